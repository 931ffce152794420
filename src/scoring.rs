//! Weighted deficiency scoring.
//!
//! Turns recorded failures into a normalized 0-100 deficiency index, overall
//! and per WCAG POUR principle. Lower is better. The historical name
//! "quality score" survives in the entry point; the number it produces
//! measures deficiency, not quality.

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::core::{AuditState, JudgmentStatus, Requirement, RuleFile, Sample, POUR_TAXONOMY_ID};

/// Importance weight of a requirement, derived from its impact metadata.
/// Requirements without impact metadata carry no weight.
pub fn requirement_weight(requirement: &Requirement) -> f64 {
    match &requirement.impact {
        None => 0.0,
        Some(impact) => {
            let critical_factor = if impact.is_critical { 1.0 } else { 0.9 };
            critical_factor * (impact.primary_score + 0.5 * impact.secondary_score).sqrt()
        }
    }
}

/// Scorer-flavored relevance: a sample that selects no content types has no
/// relevant requirements at all. Progress calculation uses the laxer rule in
/// [`crate::status::is_relevant_for_progress`].
pub fn relevant_requirements_for_sample<'a>(
    rule_file: &'a RuleFile,
    sample: &Sample,
) -> Vec<(&'a String, &'a Requirement)> {
    if sample.selected_content_types.is_empty() {
        return Vec::new();
    }
    rule_file
        .requirements
        .iter()
        .filter(|(_, requirement)| {
            requirement.content_types.is_empty()
                || requirement
                    .content_types
                    .iter()
                    .any(|ct| sample.selected_content_types.contains(ct))
        })
        .collect()
}

/// Deficiency index for one principle bucket.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipleScore {
    pub label: String,
    pub score: f64,
}

/// Scorer output: overall index, per-principle breakdown, and the number of
/// samples the figures are computed over.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityScore {
    pub total_score: f64,
    pub principles: BTreeMap<String, PrincipleScore>,
    pub sample_count: usize,
}

#[derive(Default)]
struct Bucket {
    max_weight: f64,
    deductions: f64,
}

impl Bucket {
    fn index(&self) -> f64 {
        if self.max_weight > 0.0 {
            round_one_decimal(self.deductions / self.max_weight * 100.0)
        } else {
            0.0
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Computes the weighted deficiency index over the whole audit.
///
/// Returns `None` when there is not enough data to score: no requirements,
/// no POUR taxonomy, or no samples. Callers must render that case as an
/// explicit "not enough data" outcome rather than a zero score.
///
/// Deductions are only drawn from check results whose manual overall status
/// is literally `passed`; a check judged `failed` at the top level
/// contributes nothing even if criteria fail underneath it. Each failing
/// criterion costs one requirement weight, capped so a single requirement
/// never loses more than its own maximum weight.
pub fn calculate_quality_score(state: &AuditState) -> Option<QualityScore> {
    let rule_file = &state.rule_file;
    if rule_file.requirements.is_empty() || state.samples.is_empty() {
        return None;
    }
    let taxonomy = rule_file.taxonomy(POUR_TAXONOMY_ID)?;

    let mut total = Bucket::default();
    let mut principles: BTreeMap<String, (String, Bucket)> = taxonomy
        .concepts
        .iter()
        .map(|concept| {
            (
                concept.id.clone(),
                (concept.label.clone(), Bucket::default()),
            )
        })
        .collect();

    for sample in &state.samples {
        for (key, requirement) in relevant_requirements_for_sample(rule_file, sample) {
            let weight = requirement_weight(requirement);
            total.max_weight += weight;
            let principle = requirement.concept_in(POUR_TAXONOMY_ID);
            if let Some((_, bucket)) = principle.and_then(|id| principles.get_mut(id)) {
                bucket.max_weight += weight;
            }

            let Some(requirement_result) = sample.results.get(key) else {
                continue;
            };
            let failing: usize = requirement_result
                .checks
                .iter()
                .filter(|(_, check_result)| {
                    check_result.overall_status == JudgmentStatus::Passed
                })
                .map(|(_, check_result)| {
                    check_result
                        .pass_criteria
                        .iter()
                        .filter(|(_, criterion)| criterion.status == JudgmentStatus::Failed)
                        .count()
                })
                .sum();
            if failing == 0 {
                continue;
            }

            let raw_deductions = failing as f64 * weight;
            let adjusted_deductions = raw_deductions.min(weight);
            total.deductions += adjusted_deductions;
            if let Some((_, bucket)) = principle.and_then(|id| principles.get_mut(id)) {
                bucket.deductions += adjusted_deductions;
            }
        }
    }

    debug!(
        "scored {} samples: deductions {:.3} of max weight {:.3}",
        state.samples.len(),
        total.deductions,
        total.max_weight
    );

    Some(QualityScore {
        total_score: total.index(),
        principles: principles
            .into_iter()
            .map(|(id, (label, bucket))| {
                let score = bucket.index();
                (id, PrincipleScore { label, score })
            })
            .collect(),
        sample_count: state.samples.len(),
    })
}
