//! Markdown summary written to disk.

use std::path::Path;

use anyhow::{Context, Result};

use gradepace_core::report::ProgressReport;

/// Render the report as a standalone markdown document.
pub fn render_markdown(report: &ProgressReport) -> String {
    let mut md = String::from("# gradepace report\n\n");
    md.push_str(&format!(
        "_Generated {}_\n\n",
        report.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    md.push_str(&report.to_markdown());
    md
}

pub fn write_markdown_report(report: &ProgressReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render_markdown(report))
        .with_context(|| format!("failed to write report to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradepace_core::model::ProgressState;

    #[test]
    fn markdown_has_heading_and_body() {
        let report = ProgressReport::compute(&ProgressState::fresh()).unwrap();
        let md = render_markdown(&report);
        assert!(md.starts_with("# gradepace report"));
        assert!(md.contains("**Target:** 70%"));
        assert!(md.contains("### Plan: Subject 1"));
    }
}
