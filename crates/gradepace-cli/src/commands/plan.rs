//! The `gradepace plan` command.

use anyhow::Result;

use gradepace_core::error::EditError;
use gradepace_core::report::{ProgressReport, SubjectReport};

use crate::session::Session;

pub fn execute(session: &Session, subject: Option<&str>) -> Result<()> {
    let state = session.load()?;
    let report = ProgressReport::compute(&state)?;

    let selected: Vec<&SubjectReport> = match subject {
        Some(name) => vec![report
            .subject(name)
            .ok_or_else(|| EditError::UnknownSubject(name.to_string()))?],
        None => report.subjects.iter().collect(),
    };

    if selected.is_empty() {
        println!("No subjects.");
        return Ok(());
    }

    for (i, s) in selected.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_subject(&report, s);
    }

    Ok(())
}

fn print_subject(report: &ProgressReport, s: &SubjectReport) {
    println!(
        "{}: {:.1}/{:.0} so far ({:.1}%), target {}% [{}]",
        s.name, s.so_far.earned, s.so_far.max, s.pct_so_far, report.target_pct, s.status.label
    );

    if s.plan.is_empty() {
        println!("  All assessments scored: final {:.1}%", s.pct_all);
        return;
    }

    if let Some(next) = &s.next {
        let note = if next.feasible { "" } else { " (not achievable)" };
        println!(
            "  Next: {} needs {} of {} ({:.0}%){}",
            next.assessment,
            next.needed,
            next.max,
            next.need_pct(),
            note
        );
    }

    println!("  Remaining plan:");
    for row in &s.plan.rows {
        let note = if row.feasible { "" } else { "  (over max)" };
        println!("    {:<10} {} / {}{}", row.assessment, row.needed, row.max, note);
    }

    if s.shortfall.is_short() {
        println!(
            "  Short by {} marks even with full marks in every remaining assessment.",
            s.shortfall.shortfall
        );
        let candidates = report.make_up_candidates(&s.name);
        if !candidates.is_empty() {
            let list: Vec<String> = candidates
                .iter()
                .map(|c| format!("{} ({:.0})", c.subject, c.remaining_max))
                .collect();
            println!("  Marks still available in: {}", list.join(", "));
        }
    }
}
