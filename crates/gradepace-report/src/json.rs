//! JSON export of a progress report.

use std::path::Path;

use anyhow::{Context, Result};

use gradepace_core::report::ProgressReport;

/// Write the report as pretty-printed JSON.
pub fn write_json_report(report: &ProgressReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

/// Load a previously exported report.
pub fn load_json_report(path: &Path) -> Result<ProgressReport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read report from {}", path.display()))?;
    let report: ProgressReport =
        serde_json::from_str(&content).context("failed to parse report JSON")?;
    Ok(report)
}
