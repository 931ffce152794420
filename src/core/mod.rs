pub mod errors;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Taxonomy id of the WCAG 2.2 POUR principle vocabulary used for the
/// per-principle score breakdown.
pub const POUR_TAXONOMY_ID: &str = "wcag22-pour";

/// Raw auditor judgment recorded against a pass criterion, and the manual
/// top-level judgment on a check.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum JudgmentStatus {
    #[default]
    NotAudited,
    Passed,
    Failed,
}

/// Computed status of a check or requirement. Unlike [`JudgmentStatus`] this
/// includes the mixed outcome `PartiallyAudited`. Never stored; always
/// recomputed from the audit snapshot.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AggregateStatus {
    #[default]
    NotAudited,
    Passed,
    Failed,
    PartiallyAudited,
}

impl AggregateStatus {
    /// A requirement counts toward progress once it has been decided either way.
    pub fn is_decided(&self) -> bool {
        matches!(self, AggregateStatus::Passed | AggregateStatus::Failed)
    }
}

impl From<JudgmentStatus> for AggregateStatus {
    fn from(status: JudgmentStatus) -> Self {
        match status {
            JudgmentStatus::NotAudited => AggregateStatus::NotAudited,
            JudgmentStatus::Passed => AggregateStatus::Passed,
            JudgmentStatus::Failed => AggregateStatus::Failed,
        }
    }
}

impl std::fmt::Display for JudgmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JudgmentStatus::NotAudited => "not audited",
            JudgmentStatus::Passed => "passed",
            JudgmentStatus::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

impl std::fmt::Display for AggregateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AggregateStatus::NotAudited => "not audited",
            AggregateStatus::Passed => "passed",
            AggregateStatus::Failed => "failed",
            AggregateStatus::PartiallyAudited => "partially audited",
        };
        write!(f, "{s}")
    }
}

/// How a check combines its pass-criterion judgments.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckLogic {
    #[default]
    And,
    Or,
}

/// The rule definitions an audit is evaluated against: requirements keyed by
/// their canonical key, plus the classification vocabularies they reference.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuleFile {
    #[serde(default)]
    pub requirements: im::HashMap<String, Requirement>,
    #[serde(default)]
    pub taxonomies: Vec<Taxonomy>,
}

impl RuleFile {
    pub fn taxonomy(&self, id: &str) -> Option<&Taxonomy> {
        self.taxonomies.iter().find(|t| t.id == id)
    }
}

/// A named classification vocabulary, e.g. the four POUR principles.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Taxonomy {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub concepts: Vec<TaxonomyConcept>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyConcept {
    pub id: String,
    #[serde(default)]
    pub label: String,
}

/// Link from a requirement to a concept in a named taxonomy.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub taxonomy: String,
    pub concept: String,
}

/// Impact metadata driving the requirement's weight in the deficiency index.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Impact {
    pub is_critical: bool,
    pub primary_score: f64,
    pub secondary_score: f64,
}

/// A single accessibility rule: the unit reported in progress and scoring.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    #[serde(default)]
    pub title: String,
    /// Canonical reference text, e.g. a success-criterion number. Falls back
    /// to `title` wherever a display reference is needed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Content types this requirement applies to; empty means unrestricted.
    #[serde(default)]
    pub content_types: Vec<String>,
    #[serde(default)]
    pub classifications: Vec<Classification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<Impact>,
    #[serde(default)]
    pub checks: Vec<Check>,
}

impl Requirement {
    /// Reference text used for display and identifier ordering.
    pub fn reference_text(&self) -> &str {
        self.reference.as_deref().unwrap_or(&self.title)
    }

    /// The concept this requirement is classified under in the given taxonomy.
    pub fn concept_in(&self, taxonomy_id: &str) -> Option<&str> {
        self.classifications
            .iter()
            .find(|c| c.taxonomy == taxonomy_id)
            .map(|c| c.concept.as_str())
    }
}

/// A group of pass criteria combined under AND/OR logic, with room for an
/// independent manual judgment in its result.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Check {
    pub id: String,
    #[serde(default)]
    pub logic: CheckLogic,
    #[serde(default)]
    pub pass_criteria: Vec<PassCriterion>,
}

/// Smallest unit of judgment. Carries no runtime state of its own; state
/// lives in [`PassCriterionResult`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PassCriterion {
    pub id: String,
    #[serde(default)]
    pub requirement_text: String,
}

/// One audited artifact instance with its own result set.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub selected_content_types: Vec<String>,
    /// Requirement key -> recorded results for this sample.
    #[serde(default)]
    pub results: im::HashMap<String, RequirementResult>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequirementResult {
    /// Directly recorded status, consulted only for requirements without checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AggregateStatus>,
    #[serde(default)]
    pub checks: im::HashMap<String, CheckResult>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    /// Manually set auditor judgment, independent of the criterion rollup.
    #[serde(default)]
    pub overall_status: JudgmentStatus,
    #[serde(default)]
    pub pass_criteria: im::HashMap<String, PassCriterionResult>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PassCriterionResult {
    #[serde(default)]
    pub status: JudgmentStatus,
    /// Present iff `status` is `failed`; maintained by the deficiency assigner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deficiency_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation_detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl PassCriterionResult {
    pub fn new(status: JudgmentStatus) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }
}

/// Lifecycle phase of an audit. Locking triggers the full identifier resort.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditPhase {
    #[default]
    NotStarted,
    InProgress,
    Locked,
}

impl std::fmt::Display for AuditPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AuditPhase::NotStarted => "not started",
            AuditPhase::InProgress => "in progress",
            AuditPhase::Locked => "locked",
        };
        write!(f, "{s}")
    }
}

/// Complete audit snapshot. All engine functions take this (or parts of it)
/// by reference and return derived values or a new snapshot; the `im`
/// collections make the new snapshot share structure with the old one.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditState {
    #[serde(default)]
    pub rule_file: RuleFile,
    #[serde(default)]
    pub samples: im::Vector<Sample>,
    /// Next deficiency sequence number to hand out.
    #[serde(default = "default_deficiency_counter")]
    pub deficiency_counter: u32,
    #[serde(default)]
    pub phase: AuditPhase,
}

fn default_deficiency_counter() -> u32 {
    1
}

impl AuditState {
    pub fn new(rule_file: RuleFile) -> Self {
        Self {
            rule_file,
            samples: im::Vector::new(),
            deficiency_counter: default_deficiency_counter(),
            phase: AuditPhase::default(),
        }
    }
}

impl Default for AuditState {
    fn default() -> Self {
        Self::new(RuleFile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn judgment_status_serializes_snake_case() {
        let json = serde_json::to_string(&JudgmentStatus::NotAudited).unwrap();
        assert_eq!(json, "\"not_audited\"");
        let back: JudgmentStatus = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(back, JudgmentStatus::Failed);
    }

    #[test]
    fn check_logic_defaults_to_and() {
        let check: Check = serde_json::from_str(r#"{"id": "c1"}"#).unwrap();
        assert_eq!(check.logic, CheckLogic::And);
        let or_check: Check = serde_json::from_str(r#"{"id": "c2", "logic": "OR"}"#).unwrap();
        assert_eq!(or_check.logic, CheckLogic::Or);
    }

    #[test]
    fn reference_text_falls_back_to_title() {
        let req = Requirement {
            title: "Non-text content".to_string(),
            ..Default::default()
        };
        assert_eq!(req.reference_text(), "Non-text content");

        let with_ref = Requirement {
            title: "Non-text content".to_string(),
            reference: Some("1.1.1".to_string()),
            ..Default::default()
        };
        assert_eq!(with_ref.reference_text(), "1.1.1");
    }

    #[test]
    fn deficiency_counter_defaults_to_one() {
        let state: AuditState = serde_json::from_str("{}").unwrap();
        assert_eq!(state.deficiency_counter, 1);
        assert_eq!(state.phase, AuditPhase::NotStarted);
    }

    #[test]
    fn deficiency_id_omitted_when_absent() {
        let result = PassCriterionResult::new(JudgmentStatus::Passed);
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("deficiencyId"));
    }
}
