//! The `gradepace score` command.

use anyhow::{Context, Result};

use gradepace_core::projection::project_next;

use crate::session::Session;

pub fn execute(
    session: &Session,
    subject: &str,
    assessment: &str,
    value: Option<f64>,
) -> Result<()> {
    let policy = session.config.score_policy();
    let state = session.update(|s| s.with_score(subject, assessment, value, policy))?;

    let record = state
        .subject(subject)
        .and_then(|s| s.assessment(assessment))
        .context("score was saved but the record is missing")?;
    match record.score {
        Some(score) => println!("{subject} {assessment}: {score} / {}", record.max),
        None => println!("{subject} {assessment}: cleared"),
    }

    if let Some(next) = state
        .subject(subject)
        .and_then(|s| project_next(s, state.target_pct))
    {
        println!(
            "Next: {} needs {} of {} ({:.0}%)",
            next.assessment,
            next.needed,
            next.max,
            next.need_pct()
        );
    }

    Ok(())
}
