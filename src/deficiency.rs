//! Deficiency identifier assignment.
//!
//! Every failing pass-criterion judgment carries a stable, display-facing
//! identifier such as `brist 0007`. While the audit is in progress new
//! failures get the next free sequence number and cleared failures lose
//! theirs, without ever renumbering existing identifiers. On the first lock
//! the whole set is resorted into reading order (requirement reference,
//! sample description, criterion text) and renumbered from 1.

use std::cmp::Ordering;
use std::collections::HashMap;

use log::debug;

use crate::core::{
    AuditPhase, AuditState, CheckResult, JudgmentStatus, PassCriterionResult, RequirementResult,
    Sample,
};

/// Renders a sequence number in the display format, e.g. `brist 0001`.
pub fn format_deficiency_id(prefix: &str, sequence: u32) -> String {
    format!("{prefix} {sequence:04}")
}

/// Location of one pass-criterion result inside the audit snapshot.
pub struct CriterionAddress<'a> {
    pub sample_id: &'a str,
    pub requirement_key: &'a str,
    pub check_id: &'a str,
    pub criterion_id: &'a str,
}

fn address_key(address: &CriterionAddress<'_>) -> String {
    [
        address.sample_id,
        address.requirement_key,
        address.check_id,
        address.criterion_id,
    ]
    .join("\u{1f}")
}

/// Rebuilds the snapshot with `f` applied to every pass-criterion result.
/// Untouched subtrees keep sharing structure with the input.
fn map_pass_criteria<F>(state: &AuditState, mut f: F) -> AuditState
where
    F: FnMut(&CriterionAddress<'_>, &PassCriterionResult) -> PassCriterionResult,
{
    let mut samples = im::Vector::new();
    for sample in &state.samples {
        let mut results = sample.results.clone();
        for (requirement_key, requirement_result) in sample.results.iter() {
            let mut checks = requirement_result.checks.clone();
            let mut requirement_changed = false;
            for (check_id, check_result) in requirement_result.checks.iter() {
                let mut criteria = check_result.pass_criteria.clone();
                let mut check_changed = false;
                for (criterion_id, criterion_result) in check_result.pass_criteria.iter() {
                    let address = CriterionAddress {
                        sample_id: &sample.id,
                        requirement_key,
                        check_id,
                        criterion_id,
                    };
                    let updated = f(&address, criterion_result);
                    if updated != *criterion_result {
                        criteria.insert(criterion_id.clone(), updated);
                        check_changed = true;
                    }
                }
                if check_changed {
                    checks.insert(
                        check_id.clone(),
                        CheckResult {
                            overall_status: check_result.overall_status,
                            pass_criteria: criteria,
                        },
                    );
                    requirement_changed = true;
                }
            }
            if requirement_changed {
                results.insert(
                    requirement_key.clone(),
                    RequirementResult {
                        status: requirement_result.status,
                        checks,
                    },
                );
            }
        }
        samples.push_back(Sample {
            results,
            ..sample.clone()
        });
    }
    AuditState {
        samples,
        ..state.clone()
    }
}

/// True when any pass-criterion result currently carries an identifier.
pub fn has_assigned_ids(state: &AuditState) -> bool {
    state.samples.iter().any(|sample| {
        sample.results.iter().any(|(_, requirement_result)| {
            requirement_result.checks.iter().any(|(_, check_result)| {
                check_result
                    .pass_criteria
                    .iter()
                    .any(|(_, criterion)| criterion.deficiency_id.is_some())
            })
        })
    })
}

/// Incremental identifier pass: failing results without an identifier get
/// the next sequence number, results that are no longer failing lose theirs.
/// Existing identifiers are never renumbered, so re-running this on an
/// unchanged failure set is a no-op.
pub fn update_incremental_ids(state: &AuditState, prefix: &str) -> AuditState {
    let mut counter = state.deficiency_counter;
    let updated = map_pass_criteria(state, |_, criterion| match criterion.status {
        JudgmentStatus::Failed if criterion.deficiency_id.is_none() => {
            let id = format_deficiency_id(prefix, counter);
            counter += 1;
            PassCriterionResult {
                deficiency_id: Some(id),
                ..criterion.clone()
            }
        }
        JudgmentStatus::Failed => criterion.clone(),
        _ if criterion.deficiency_id.is_some() => PassCriterionResult {
            deficiency_id: None,
            ..criterion.clone()
        },
        _ => criterion.clone(),
    });
    if counter != state.deficiency_counter {
        debug!(
            "assigned {} new deficiency ids, counter now {counter}",
            counter - state.deficiency_counter
        );
    }
    AuditState {
        deficiency_counter: counter,
        ..updated
    }
}

struct FailingCriterion {
    address: String,
    reference: String,
    sample_description: String,
    criterion_text: String,
    // deterministic tie-break, independent of sample ordering
    requirement_key: String,
    sample_id: String,
    check_id: String,
    criterion_id: String,
}

fn collect_failing(state: &AuditState) -> Vec<FailingCriterion> {
    let mut failing = Vec::new();
    for sample in &state.samples {
        for (requirement_key, requirement_result) in sample.results.iter() {
            let requirement = state.rule_file.requirements.get(requirement_key);
            for (check_id, check_result) in requirement_result.checks.iter() {
                for (criterion_id, criterion_result) in check_result.pass_criteria.iter() {
                    if criterion_result.status != JudgmentStatus::Failed {
                        continue;
                    }
                    let reference = requirement
                        .map(|r| r.reference_text().to_string())
                        .unwrap_or_else(|| requirement_key.clone());
                    let criterion_text = requirement
                        .and_then(|r| r.checks.iter().find(|c| &c.id == check_id))
                        .and_then(|c| c.pass_criteria.iter().find(|pc| &pc.id == criterion_id))
                        .map(|pc| pc.requirement_text.clone())
                        .unwrap_or_else(|| criterion_id.clone());
                    failing.push(FailingCriterion {
                        address: address_key(&CriterionAddress {
                            sample_id: &sample.id,
                            requirement_key,
                            check_id,
                            criterion_id,
                        }),
                        reference,
                        sample_description: sample.description.clone(),
                        criterion_text,
                        requirement_key: requirement_key.clone(),
                        sample_id: sample.id.clone(),
                        check_id: check_id.clone(),
                        criterion_id: criterion_id.clone(),
                    });
                }
            }
        }
    }
    failing
}

/// Full resort on the lock transition: all identifiers are discarded and the
/// failing criteria renumbered 1..N in reading order. The ordering depends
/// only on the three sort keys, never on traversal or sample order.
pub fn assign_sorted_ids_on_lock(state: &AuditState, prefix: &str) -> AuditState {
    let mut failing = collect_failing(state);
    failing.sort_by(|a, b| {
        natural_cmp(&a.reference, &b.reference)
            .then_with(|| natural_cmp(&a.sample_description, &b.sample_description))
            .then_with(|| natural_cmp(&a.criterion_text, &b.criterion_text))
            .then_with(|| a.requirement_key.cmp(&b.requirement_key))
            .then_with(|| a.sample_id.cmp(&b.sample_id))
            .then_with(|| a.check_id.cmp(&b.check_id))
            .then_with(|| a.criterion_id.cmp(&b.criterion_id))
    });
    let assignments: HashMap<String, u32> = failing
        .iter()
        .enumerate()
        .map(|(index, entry)| (entry.address.clone(), index as u32 + 1))
        .collect();
    debug!("resorted {} deficiency ids", assignments.len());

    let updated = map_pass_criteria(state, |address, criterion| {
        let deficiency_id = assignments
            .get(&address_key(address))
            .map(|sequence| format_deficiency_id(prefix, *sequence));
        if deficiency_id == criterion.deficiency_id {
            criterion.clone()
        } else {
            PassCriterionResult {
                deficiency_id,
                ..criterion.clone()
            }
        }
    });
    AuditState {
        deficiency_counter: failing.len() as u32 + 1,
        ..updated
    }
}

/// Lock transition. The first lock of an audit cycle resorts identifiers
/// from scratch; once identifiers exist they stay stable and only the
/// incremental pass runs.
pub fn lock_audit(state: &AuditState, prefix: &str) -> AuditState {
    let renumbered = if has_assigned_ids(state) {
        update_incremental_ids(state, prefix)
    } else {
        assign_sorted_ids_on_lock(state, prefix)
    };
    AuditState {
        phase: AuditPhase::Locked,
        ..renumbered
    }
}

/// Reverse transition back to active auditing; identifiers are untouched.
pub fn reopen_audit(state: &AuditState) -> AuditState {
    AuditState {
        phase: AuditPhase::InProgress,
        ..state.clone()
    }
}

/// Natural, case-insensitive ordering: digit runs compare numerically, so
/// `1.4.3` sorts before `1.4.10`.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let tokens_a = natural_tokens(a);
    let tokens_b = natural_tokens(b);
    for (x, y) in tokens_a.iter().zip(tokens_b.iter()) {
        let ord = match (x, y) {
            (NaturalToken::Number(x), NaturalToken::Number(y)) => cmp_digit_runs(x, y),
            (NaturalToken::Text(x), NaturalToken::Text(y)) => x.cmp(y),
            (NaturalToken::Number(_), NaturalToken::Text(_)) => Ordering::Less,
            (NaturalToken::Text(_), NaturalToken::Number(_)) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    tokens_a
        .len()
        .cmp(&tokens_b.len())
        .then_with(|| a.cmp(b))
}

enum NaturalToken {
    Number(String),
    Text(String),
}

fn natural_tokens(s: &str) -> Vec<NaturalToken> {
    let mut tokens: Vec<NaturalToken> = Vec::new();
    for c in s.chars() {
        if c.is_ascii_digit() {
            match tokens.last_mut() {
                Some(NaturalToken::Number(run)) => run.push(c),
                _ => tokens.push(NaturalToken::Number(c.to_string())),
            }
        } else {
            let lowered: String = c.to_lowercase().collect();
            match tokens.last_mut() {
                Some(NaturalToken::Text(run)) => run.push_str(&lowered),
                _ => tokens.push(NaturalToken::Text(lowered)),
            }
        }
    }
    tokens
}

fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let trimmed_a = a.trim_start_matches('0');
    let trimmed_b = b.trim_start_matches('0');
    trimmed_a
        .len()
        .cmp(&trimmed_b.len())
        .then_with(|| trimmed_a.cmp(trimmed_b))
        .then_with(|| a.len().cmp(&b.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_format_is_zero_padded() {
        assert_eq!(format_deficiency_id("brist", 1), "brist 0001");
        assert_eq!(format_deficiency_id("brist", 42), "brist 0042");
        assert_eq!(format_deficiency_id("lack", 12345), "lack 12345");
    }

    #[test]
    fn natural_cmp_orders_digit_runs_numerically() {
        assert_eq!(natural_cmp("1.4.3", "1.4.10"), Ordering::Less);
        assert_eq!(natural_cmp("1.4.10", "1.4.3"), Ordering::Greater);
        assert_eq!(natural_cmp("2.1.1", "10.1.1"), Ordering::Less);
        assert_eq!(natural_cmp("page 9", "page 11"), Ordering::Less);
    }

    #[test]
    fn natural_cmp_is_case_insensitive() {
        assert_eq!(natural_cmp("Kontakt", "kontakt"), Ordering::Less);
        assert_eq!(natural_cmp("alpha", "Beta"), Ordering::Less);
    }

    #[test]
    fn natural_cmp_leading_zeros_compare_equal_in_value() {
        assert_eq!(natural_cmp("step 007", "step 8"), Ordering::Less);
        // equal value falls back to run length, so bare digits sort first
        assert_eq!(natural_cmp("step 7", "step 07"), Ordering::Less);
    }

    #[test]
    fn empty_state_has_no_assigned_ids() {
        let state = AuditState::default();
        assert!(!has_assigned_ids(&state));
        let locked = lock_audit(&state, "brist");
        assert_eq!(locked.phase, AuditPhase::Locked);
        assert_eq!(locked.deficiency_counter, 1);
    }
}
