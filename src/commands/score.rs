use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};
use std::path::Path;

use crate::cli::OutputFormat;
use crate::io;
use crate::scoring::{calculate_quality_score, QualityScore};

pub fn score_audit(path: &Path, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let state = io::load_audit(path)?;
    let score = calculate_quality_score(&state);

    let rendered = match format {
        OutputFormat::Json => render_json(score.as_ref())?,
        OutputFormat::Terminal => render_terminal(score.as_ref()),
    };

    match output {
        Some(path) => io::write_file(path, &rendered)?,
        None => println!("{rendered}"),
    }
    Ok(())
}

fn render_json(score: Option<&QualityScore>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&score)?)
}

fn render_terminal(score: Option<&QualityScore>) -> String {
    let Some(score) = score else {
        return "Not enough data to compute a deficiency index. The audit needs \
                rule definitions, a POUR taxonomy, and at least one sample."
            .to_string();
    };

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Principle", "Deficiency index"]);
    for principle in score.principles.values() {
        table.add_row(vec![
            principle.label.clone(),
            colorize_index(principle.score),
        ]);
    }
    table.add_row(vec!["Total".to_string(), colorize_index(score.total_score)]);

    format!(
        "{table}\n{} samples scored (0 = no deficiencies, 100 = worst)",
        score.sample_count
    )
}

fn colorize_index(score: f64) -> String {
    let text = format!("{score:.1}");
    if score == 0.0 {
        text.green().to_string()
    } else if score < 20.0 {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}
