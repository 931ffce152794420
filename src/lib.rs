// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod deficiency;
pub mod io;
pub mod migration;
pub mod scoring;
pub mod status;

// Re-export commonly used types
pub use crate::core::{
    AggregateStatus, AuditPhase, AuditState, Check, CheckLogic, CheckResult, Classification,
    Impact, JudgmentStatus, PassCriterion, PassCriterionResult, Requirement, RequirementResult,
    RuleFile, Sample, Taxonomy, TaxonomyConcept, POUR_TAXONOMY_ID,
};

pub use crate::deficiency::{
    assign_sorted_ids_on_lock, format_deficiency_id, has_assigned_ids, lock_audit, reopen_audit,
    update_incremental_ids,
};

pub use crate::scoring::{
    calculate_quality_score, relevant_requirements_for_sample, requirement_weight, PrincipleScore,
    QualityScore,
};

pub use crate::status::{
    audit_progress, check_status, is_relevant_for_progress, requirement_status, sample_progress,
    Progress,
};
