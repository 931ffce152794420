use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};
use serde::Serialize;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::core::AuditState;
use crate::io;
use crate::status::{audit_progress, sample_progress, Progress};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressReport {
    phase: String,
    overall: ProgressEntry,
    samples: Vec<ProgressEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    decided: usize,
    relevant: usize,
    ratio: f64,
}

impl ProgressEntry {
    fn new(id: Option<String>, description: Option<String>, progress: Progress) -> Self {
        Self {
            id,
            description,
            decided: progress.decided,
            relevant: progress.relevant,
            ratio: progress.ratio(),
        }
    }
}

pub fn report_progress(path: &Path, format: OutputFormat) -> Result<()> {
    let state = io::load_audit(path)?;
    let report = build_report(&state);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Terminal => println!("{}", render_terminal(&report)),
    }
    Ok(())
}

fn build_report(state: &AuditState) -> ProgressReport {
    ProgressReport {
        phase: state.phase.to_string(),
        overall: ProgressEntry::new(None, None, audit_progress(state)),
        samples: state
            .samples
            .iter()
            .map(|sample| {
                ProgressEntry::new(
                    Some(sample.id.clone()),
                    Some(sample.description.clone()),
                    sample_progress(&state.rule_file, sample),
                )
            })
            .collect(),
    }
}

fn render_terminal(report: &ProgressReport) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Sample", "Decided", "Relevant", "Progress"]);
    for sample in &report.samples {
        table.add_row(vec![
            sample.description.clone().unwrap_or_default(),
            sample.decided.to_string(),
            sample.relevant.to_string(),
            format_ratio(sample.ratio),
        ]);
    }
    table.add_row(vec![
        "Overall".to_string(),
        report.overall.decided.to_string(),
        report.overall.relevant.to_string(),
        format_ratio(report.overall.ratio),
    ]);

    format!("Audit phase: {}\n{table}", report.phase)
}

fn format_ratio(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}
