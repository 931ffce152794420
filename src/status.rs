//! Status aggregation: rolls pass-criterion judgments up into check and
//! requirement statuses and derives audit progress.
//!
//! Everything here is a total function over the snapshot. Missing results
//! degrade to `not_audited` rather than erroring, so partially recorded
//! audits always produce a well-defined status.

use serde::Serialize;

use crate::core::{
    AggregateStatus, AuditState, Check, CheckLogic, CheckResult, JudgmentStatus, Requirement,
    RequirementResult, RuleFile, Sample,
};

/// Status of a single check, derived from its manual judgment and the
/// recorded statuses of its pass criteria.
///
/// The manual `overallStatus` is consulted first: `not_audited` means the
/// check has not been opened yet, and a manual `failed` reports as `passed`
/// (the judgment has been taken over by hand and the rollup stands down).
/// A check without pass criteria is vacuously `passed`.
pub fn check_status(check: &Check, result: Option<&CheckResult>) -> AggregateStatus {
    let overall = result.map(|r| r.overall_status).unwrap_or_default();
    match overall {
        JudgmentStatus::Failed => return AggregateStatus::Passed,
        JudgmentStatus::NotAudited => return AggregateStatus::NotAudited,
        JudgmentStatus::Passed => {}
    }

    if check.pass_criteria.is_empty() {
        return AggregateStatus::Passed;
    }

    // Criterion statuses in definition order; unrecorded criteria count as
    // not audited.
    let statuses: Vec<JudgmentStatus> = check
        .pass_criteria
        .iter()
        .map(|pc| {
            result
                .and_then(|r| r.pass_criteria.get(&pc.id))
                .map(|pc_result| pc_result.status)
                .unwrap_or_default()
        })
        .collect();

    match check.logic {
        CheckLogic::And => combine_and(&statuses),
        CheckLogic::Or => combine_or(&statuses),
    }
}

fn combine_and(statuses: &[JudgmentStatus]) -> AggregateStatus {
    if statuses.contains(&JudgmentStatus::Failed) {
        AggregateStatus::Failed
    } else if statuses.contains(&JudgmentStatus::NotAudited) {
        AggregateStatus::PartiallyAudited
    } else {
        AggregateStatus::Passed
    }
}

fn combine_or(statuses: &[JudgmentStatus]) -> AggregateStatus {
    if statuses.contains(&JudgmentStatus::Passed) {
        AggregateStatus::Passed
    } else if statuses.contains(&JudgmentStatus::NotAudited) {
        AggregateStatus::PartiallyAudited
    } else if statuses.iter().all(|s| *s == JudgmentStatus::Failed) {
        AggregateStatus::Failed
    } else {
        AggregateStatus::NotAudited
    }
}

/// Status of a requirement, folded over its checks in definition order with
/// priority `failed > partially_audited > not_audited > passed`.
///
/// A requirement without checks falls back to the result's own recorded
/// status; a requirement without a result is `not_audited`.
pub fn requirement_status(
    requirement: &Requirement,
    result: Option<&RequirementResult>,
) -> AggregateStatus {
    if requirement.checks.is_empty() {
        return result.and_then(|r| r.status).unwrap_or_default();
    }
    let Some(result) = result else {
        return AggregateStatus::NotAudited;
    };

    let mut saw_partially = false;
    let mut saw_not_audited = false;
    for check in &requirement.checks {
        match check_status(check, result.checks.get(&check.id)) {
            AggregateStatus::Failed => return AggregateStatus::Failed,
            AggregateStatus::PartiallyAudited => saw_partially = true,
            AggregateStatus::NotAudited => saw_not_audited = true,
            AggregateStatus::Passed => {}
        }
    }
    if saw_partially {
        AggregateStatus::PartiallyAudited
    } else if saw_not_audited {
        AggregateStatus::NotAudited
    } else {
        AggregateStatus::Passed
    }
}

/// Progress-flavored relevance: a sample with no selected content types
/// counts every requirement as relevant. The scorer applies the stricter
/// rule in [`crate::scoring::relevant_requirements_for_sample`].
pub fn is_relevant_for_progress(requirement: &Requirement, sample: &Sample) -> bool {
    requirement.content_types.is_empty()
        || sample.selected_content_types.is_empty()
        || requirement
            .content_types
            .iter()
            .any(|ct| sample.selected_content_types.contains(ct))
}

/// Decided-vs-relevant requirement counts for a sample or a whole audit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub decided: usize,
    pub relevant: usize,
}

impl Progress {
    pub fn ratio(&self) -> f64 {
        if self.relevant == 0 {
            0.0
        } else {
            self.decided as f64 / self.relevant as f64
        }
    }

    fn accumulate(&mut self, other: Progress) {
        self.decided += other.decided;
        self.relevant += other.relevant;
    }
}

/// Progress of a single sample: relevant requirements whose status is
/// decided (`passed` or `failed`) over all relevant requirements.
pub fn sample_progress(rule_file: &RuleFile, sample: &Sample) -> Progress {
    let mut progress = Progress::default();
    for (key, requirement) in rule_file.requirements.iter() {
        if !is_relevant_for_progress(requirement, sample) {
            continue;
        }
        progress.relevant += 1;
        if requirement_status(requirement, sample.results.get(key)).is_decided() {
            progress.decided += 1;
        }
    }
    progress
}

/// Progress of the whole audit, summed over all samples.
pub fn audit_progress(state: &AuditState) -> Progress {
    let mut progress = Progress::default();
    for sample in &state.samples {
        progress.accumulate(sample_progress(&state.rule_file, sample));
    }
    progress
}
