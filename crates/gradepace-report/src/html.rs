//! HTML dashboard generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined and charts as
//! inline SVG.

use anyhow::Result;
use std::path::Path;

use gradepace_core::aggregate::AssessmentSum;
use gradepace_core::report::{ProgressReport, SubjectReport};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML dashboard from a progress report.
pub fn generate_html(report: &ProgressReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>gradepace report: target {}%</title>\n",
        report.target_pct
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>gradepace report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Target: <strong>{}%</strong> | {} subjects | overall so far {:.1}% | {:.1}/{:.0} marks | {}</p>\n",
        report.target_pct,
        report.subjects.len(),
        report.aggregate.overall_current_pct,
        report.aggregate.overall_totals.earned,
        report.aggregate.overall_totals.max,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Subjects</h2>\n");
    html.push_str("<table class=\"summary\" id=\"subjects\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Subject</th><th onclick=\"sortTable(1)\">So far</th><th onclick=\"sortTable(2)\">All</th><th onclick=\"sortTable(3)\">Status</th><th>Next</th><th>Needed</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for s in &report.subjects {
        let (next, needed) = match &s.next {
            Some(n) => (html_escape(&n.assessment), format!("{}/{}", n.needed, n.max)),
            None => ("-".to_string(), "-".to_string()),
        };
        let message = s
            .status
            .message
            .as_deref()
            .map(|m| format!(" <small>({})</small>", html_escape(m)))
            .unwrap_or_default();
        html.push_str(&format!(
            "<tr><td>{}</td><td>{:.1}%</td><td>{:.1}%</td><td class=\"status-{}\">{}{}</td><td>{}</td><td>{}</td></tr>\n",
            html_escape(&s.name),
            s.pct_so_far,
            s.pct_all,
            s.status.color,
            s.status.label,
            message,
            next,
            needed,
        ));
    }
    html.push_str("</tbody></table>\n");

    if !report.subjects.is_empty() {
        html.push_str(&generate_subject_chart(&report.subjects));
    }
    html.push_str("</section>\n");

    // Per-assessment series
    if !report.aggregate.sums.is_empty() {
        html.push_str("<section class=\"assessments\">\n");
        html.push_str("<h2>Assessments</h2>\n");
        html.push_str("<table>\n<thead><tr><th>Assessment</th><th>Average</th><th>Scored</th><th>Total</th></tr></thead>\n<tbody>\n");
        for (avg, sum) in report.aggregate.averages.iter().zip(&report.aggregate.sums) {
            let pct = avg
                .actual_pct
                .map(|p| format!("{p:.1}%"))
                .unwrap_or_else(|| "-".to_string());
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}/{}</td></tr>\n",
                html_escape(&avg.name),
                pct,
                avg.scored_subjects,
                sum.total,
                sum.total_max
            ));
        }
        html.push_str("</tbody></table>\n");
        html.push_str(&generate_running_total_chart(&report.aggregate.sums));
        html.push_str("</section>\n");
    }

    // Plans
    html.push_str("<section class=\"plans\">\n");
    html.push_str("<h2>Remaining assessments</h2>\n");
    for s in &report.subjects {
        if s.plan.is_empty() {
            continue;
        }
        html.push_str(&format!("<h3>{}</h3>\n", html_escape(&s.name)));
        html.push_str("<table>\n<thead><tr><th>Assessment</th><th>Needed</th><th>Max</th><th>Feasible</th></tr></thead>\n<tbody>\n");
        for row in &s.plan.rows {
            let class = if row.feasible { "pass" } else { "fail" };
            html.push_str(&format!(
                "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                class,
                html_escape(&row.assessment),
                row.needed,
                row.max,
                if row.feasible { "yes" } else { "no" }
            ));
        }
        html.push_str("</tbody></table>\n");
        if s.shortfall.is_short() {
            html.push_str(&format!(
                "<p class=\"short\">Short by {} marks even with full marks remaining.</p>\n",
                s.shortfall.shortfall
            ));
            let candidates = report.make_up_candidates(&s.name);
            if !candidates.is_empty() {
                html.push_str("<p class=\"meta\">Marks still available elsewhere: ");
                let list: Vec<String> = candidates
                    .iter()
                    .map(|c| format!("{} ({})", html_escape(&c.subject), c.remaining_max))
                    .collect();
                html.push_str(&list.join(", "));
                html.push_str("</p>\n");
            }
        }
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    // JavaScript for sorting
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML dashboard to a file.
pub fn write_html_report(report: &ProgressReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

/// Horizontal bars of each subject's completed-only percentage.
fn generate_subject_chart(subjects: &[SubjectReport]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 200;

    let total_height = subjects.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, s) in subjects.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        // Bonus marks can push a subject past 100%; the bar stops at full width.
        let width = (s.pct_so_far.clamp(0.0, 100.0) / 100.0 * max_width as f64) as usize;

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(&s.name)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width,
            y,
            width,
            bar_height,
            s.status.color.hex()
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            s.pct_so_far
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Running total of earned marks against running max across template entries.
fn generate_running_total_chart(sums: &[AssessmentSum]) -> String {
    let width = 600.0;
    let height = 200.0;
    let margin = 30.0;

    let grand_max: f64 = sums.iter().map(|s| s.total_max).sum();
    if grand_max <= 0.0 {
        return String::new();
    }

    let step = (width - 2.0 * margin) / sums.len() as f64;
    let scale = |v: f64| height - margin - v / grand_max * (height - 2.0 * margin);

    let mut running_total = 0.0;
    let mut running_max = 0.0;
    let mut total_points = Vec::with_capacity(sums.len());
    let mut max_points = Vec::with_capacity(sums.len());
    for (i, s) in sums.iter().enumerate() {
        running_total += s.total;
        running_max += s.total_max;
        let x = margin + step * (i as f64 + 0.5);
        total_points.push(format!("{x:.1},{:.1}", scale(running_total)));
        max_points.push(format!("{x:.1},{:.1}", scale(running_max)));
    }

    let mut svg = format!(
        "<svg width=\"{width}\" height=\"{height}\" xmlns=\"http://www.w3.org/2000/svg\">\n"
    );
    svg.push_str(&format!(
        "  <polyline points=\"{}\" fill=\"none\" stroke=\"#9ca3af\" stroke-dasharray=\"4\" stroke-width=\"2\"/>\n",
        max_points.join(" ")
    ));
    svg.push_str(&format!(
        "  <polyline points=\"{}\" fill=\"none\" stroke=\"#3b82f6\" stroke-width=\"2\"/>\n",
        total_points.join(" ")
    ));
    for (i, s) in sums.iter().enumerate() {
        let x = margin + step * (i as f64 + 0.5);
        svg.push_str(&format!(
            "  <text x=\"{x:.1}\" y=\"{:.1}\" font-size=\"12\" fill=\"currentColor\" text-anchor=\"middle\">{}</text>\n",
            height - 8.0,
            html_escape(&s.name)
        ));
    }
    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
.status-green { color: #16a34a; font-weight: bold; }
.status-amber { color: #ca8a04; font-weight: bold; }
.status-red { color: #dc2626; font-weight: bold; }
.short { color: #dc2626; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('subjects');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb, undefined, {numeric: true}) : vb.localeCompare(va, undefined, {numeric: true});
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
