use anyhow::Result;
use log::info;
use std::path::Path;

use crate::config;
use crate::deficiency::{lock_audit, update_incremental_ids};
use crate::io;

/// Locks the audit and writes the snapshot back, resorting deficiency
/// identifiers when this is the first lock of the cycle.
pub fn lock_audit_file(path: &Path, output: Option<&Path>, prefix: Option<&str>) -> Result<()> {
    let prefix = resolve_prefix(prefix)?;
    let state = io::load_audit(path)?;
    let locked = lock_audit(&state, &prefix);
    let assigned = locked.deficiency_counter.saturating_sub(1);
    io::save_audit(output.unwrap_or(path), &locked)?;
    info!("locked audit with counter at {}", locked.deficiency_counter);
    println!("Audit locked; deficiency identifiers numbered up to {assigned}.");
    Ok(())
}

/// Runs the incremental identifier pass and writes the snapshot back.
pub fn refresh_audit_file(path: &Path, output: Option<&Path>, prefix: Option<&str>) -> Result<()> {
    let prefix = resolve_prefix(prefix)?;
    let state = io::load_audit(path)?;
    let refreshed = update_incremental_ids(&state, &prefix);
    let assigned = refreshed.deficiency_counter - state.deficiency_counter;
    io::save_audit(output.unwrap_or(path), &refreshed)?;
    println!("Assigned {assigned} new deficiency identifiers.");
    Ok(())
}

fn resolve_prefix(prefix: Option<&str>) -> Result<String> {
    match prefix {
        Some(p) => Ok(p.to_string()),
        None => Ok(config::load_config(None)?.deficiency.prefix),
    }
}
