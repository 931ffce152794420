//! File-system boundary: reading and writing audit snapshots.
//!
//! The engine itself never touches the file system; the CLI commands go
//! through here. Loading runs the legacy-shape migration before the typed
//! model is deserialized.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::AuditState;
use crate::migration;

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Loads an audit snapshot, upgrading legacy result shapes on the way in.
pub fn load_audit(path: &Path) -> Result<AuditState> {
    let raw = read_file(path)?;
    let mut document: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    migration::migrate_audit_document(&mut document);
    let state = serde_json::from_value(document)
        .with_context(|| format!("{} is not a valid audit document", path.display()))?;
    Ok(state)
}

/// Writes an audit snapshot as pretty-printed JSON.
pub fn save_audit(path: &Path, state: &AuditState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    write_file(path, &json)
}
