//! The `gradepace validate` command.

use anyhow::{Context, Result};

use gradepace_core::validate::{check, validate};
use gradepace_store::decode_document;

use crate::session::Session;

pub fn execute(session: &Session) -> Result<()> {
    let path = session.state_file();
    if !path.exists() {
        println!("No state file at {}, nothing to validate.", path.display());
        return Ok(());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read state from {}", path.display()))?;
    let decoded = decode_document(&content)
        .with_context(|| format!("failed to parse state file {}", path.display()))?;
    let state = decoded.state;

    println!(
        "State: {} ({} subjects, {} assessments, target {}%)",
        path.display(),
        state.subjects.len(),
        state.template.len(),
        state.target_pct
    );
    if decoded.migrated {
        println!("  NOTE: legacy document, will be rewritten on next save");
    }

    check(&state).with_context(|| format!("invalid state in {}", path.display()))?;

    let warnings = validate(&state);
    for w in &warnings {
        let prefix = w
            .subject
            .as_ref()
            .map(|name| format!("  [{name}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("State valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
