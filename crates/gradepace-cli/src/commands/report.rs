//! The `gradepace report` command.

use std::path::PathBuf;

use anyhow::Result;

use gradepace_core::report::ProgressReport;
use gradepace_report::{write_reports, ReportFormat};

use crate::session::Session;

pub fn execute(session: &Session, format: &str, output: Option<PathBuf>) -> Result<()> {
    let format: ReportFormat = format.parse()?;
    let output = output.unwrap_or_else(|| session.config.output_dir.clone());

    let state = session.load()?;
    let report = ProgressReport::compute(&state)?;

    for path in write_reports(&report, &output, format)? {
        println!("Wrote {}", path.display());
    }

    Ok(())
}
