//! Report rendering for gradepace: a self-contained HTML dashboard, a JSON
//! export and a markdown summary.

pub mod html;
pub mod json;
pub mod markdown;

use std::path::{Path, PathBuf};

use anyhow::Result;

use gradepace_core::report::ProgressReport;

/// Output format accepted by [`write_reports`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Html,
    Json,
    Markdown,
    All,
}

impl std::str::FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "html" => Ok(ReportFormat::Html),
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "all" => Ok(ReportFormat::All),
            other => anyhow::bail!("unknown report format: {other} (expected html, json, markdown or all)"),
        }
    }
}

/// Write the report into `dir` in the requested format(s).
///
/// Files are named `report.html`, `report.json` and `report.md`. Returns the
/// paths written.
pub fn write_reports(report: &ProgressReport, dir: &Path, format: ReportFormat) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    if matches!(format, ReportFormat::Json | ReportFormat::All) {
        let path = dir.join("report.json");
        json::write_json_report(report, &path)?;
        written.push(path);
    }
    if matches!(format, ReportFormat::Html | ReportFormat::All) {
        let path = dir.join("report.html");
        html::write_html_report(report, &path)?;
        written.push(path);
    }
    if matches!(format, ReportFormat::Markdown | ReportFormat::All) {
        let path = dir.join("report.md");
        markdown::write_markdown_report(report, &path)?;
        written.push(path);
    }

    Ok(written)
}
