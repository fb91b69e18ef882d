//! The `gradepace status` command.

use anyhow::Result;
use comfy_table::{Cell, Color, Table};

use gradepace_core::report::ProgressReport;
use gradepace_core::status::StatusColor;

use crate::session::Session;

pub fn execute(session: &Session, format: &str) -> Result<()> {
    let state = session.load()?;
    let report = ProgressReport::compute(&state)?;

    match format {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "text" => print_text(&report),
        other => anyhow::bail!("unknown status format: {other} (expected text, json or markdown)"),
    }

    Ok(())
}

fn print_text(report: &ProgressReport) {
    println!(
        "Target: {}% | Overall so far: {:.1}%",
        report.target_pct, report.aggregate.overall_current_pct
    );

    if report.subjects.is_empty() {
        println!("No subjects. Add one with `gradepace subject add <name>`.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Subject", "So far", "All", "Status", "Next", "Needed"]);

    for s in &report.subjects {
        let (next, needed) = match &s.next {
            Some(n) => (n.assessment.clone(), format!("{}/{}", n.needed, n.max)),
            None => ("-".to_string(), "-".to_string()),
        };
        table.add_row(vec![
            Cell::new(&s.name),
            Cell::new(format!("{:.1}%", s.pct_so_far)),
            Cell::new(format!("{:.1}%", s.pct_all)),
            Cell::new(&s.status.label).fg(cell_color(s.status.color)),
            Cell::new(next),
            Cell::new(needed),
        ]);
    }

    println!("{table}");

    for s in &report.subjects {
        if let Some(message) = &s.status.message {
            println!("  {}: {}", s.name, message);
        }
    }
}

fn cell_color(color: StatusColor) -> Color {
    match color {
        StatusColor::Green => Color::Green,
        StatusColor::Amber => Color::Yellow,
        StatusColor::Red => Color::Red,
    }
}
