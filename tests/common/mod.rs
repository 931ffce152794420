// Test utility module for auditmap integration tests
#![allow(dead_code)]

use auditmap::core::{
    AuditPhase, AuditState, Check, CheckLogic, CheckResult, Classification, Impact,
    JudgmentStatus, PassCriterion, PassCriterionResult, Requirement, RequirementResult, RuleFile,
    Sample, Taxonomy, TaxonomyConcept, POUR_TAXONOMY_ID,
};

pub fn criterion(id: &str, text: &str) -> PassCriterion {
    PassCriterion {
        id: id.to_string(),
        requirement_text: text.to_string(),
    }
}

pub fn check(id: &str, logic: CheckLogic, criteria: Vec<PassCriterion>) -> Check {
    Check {
        id: id.to_string(),
        logic,
        pass_criteria: criteria,
    }
}

pub fn impact(is_critical: bool, primary_score: f64, secondary_score: f64) -> Impact {
    Impact {
        is_critical,
        primary_score,
        secondary_score,
    }
}

pub fn requirement(title: &str, checks: Vec<Check>) -> Requirement {
    Requirement {
        title: title.to_string(),
        checks,
        ..Default::default()
    }
}

pub fn classified(requirement: Requirement, concept: &str) -> Requirement {
    Requirement {
        classifications: vec![Classification {
            taxonomy: POUR_TAXONOMY_ID.to_string(),
            concept: concept.to_string(),
        }],
        ..requirement
    }
}

pub fn pour_taxonomy() -> Taxonomy {
    Taxonomy {
        id: POUR_TAXONOMY_ID.to_string(),
        label: "WCAG 2.2 principles".to_string(),
        concepts: vec![
            concept("perceivable", "Perceivable"),
            concept("operable", "Operable"),
            concept("understandable", "Understandable"),
            concept("robust", "Robust"),
        ],
    }
}

fn concept(id: &str, label: &str) -> TaxonomyConcept {
    TaxonomyConcept {
        id: id.to_string(),
        label: label.to_string(),
    }
}

pub fn rule_file(requirements: Vec<(&str, Requirement)>) -> RuleFile {
    RuleFile {
        requirements: requirements
            .into_iter()
            .map(|(key, requirement)| (key.to_string(), requirement))
            .collect(),
        taxonomies: vec![pour_taxonomy()],
    }
}

pub fn pc_result(status: JudgmentStatus) -> PassCriterionResult {
    PassCriterionResult::new(status)
}

pub fn check_result(
    overall: JudgmentStatus,
    criteria: Vec<(&str, JudgmentStatus)>,
) -> CheckResult {
    CheckResult {
        overall_status: overall,
        pass_criteria: criteria
            .into_iter()
            .map(|(id, status)| (id.to_string(), pc_result(status)))
            .collect(),
    }
}

pub fn requirement_result(checks: Vec<(&str, CheckResult)>) -> RequirementResult {
    RequirementResult {
        status: None,
        checks: checks
            .into_iter()
            .map(|(id, result)| (id.to_string(), result))
            .collect(),
    }
}

pub fn sample(id: &str, description: &str, content_types: &[&str]) -> Sample {
    Sample {
        id: id.to_string(),
        description: description.to_string(),
        selected_content_types: content_types.iter().map(|ct| ct.to_string()).collect(),
        results: im::HashMap::new(),
    }
}

pub fn with_result(sample: Sample, requirement_key: &str, result: RequirementResult) -> Sample {
    Sample {
        results: sample.results.update(requirement_key.to_string(), result),
        ..sample
    }
}

pub fn audit_state(rule_file: RuleFile, samples: Vec<Sample>) -> AuditState {
    AuditState {
        rule_file,
        samples: samples.into_iter().collect(),
        deficiency_counter: 1,
        phase: AuditPhase::InProgress,
    }
}
