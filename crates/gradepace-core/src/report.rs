//! Progress report: every derived figure for a snapshot in one value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{compute_aggregate, AggregateSummary, RemainingCapacity};
use crate::distribution::{plan_remaining, DistributionPlan};
use crate::error::CheckError;
use crate::model::{ProgressState, Subject};
use crate::projection::{project_next, NextProjection};
use crate::shortfall::{analyze_shortfall, ShortfallAnalysis};
use crate::status::{classify, SubjectStatus, TrackState};
use crate::totals::{subject_totals, totals_so_far, Totals};
use crate::validate::check;

/// Escape a name for use inside a markdown table cell.
fn table_cell(s: &str) -> String {
    s.replace('|', "\\|")
}

/// Derived figures for a single subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectReport {
    pub name: String,
    /// Totals over every assessment.
    pub totals: Totals,
    /// Totals over completed assessments only.
    pub so_far: Totals,
    /// Percentage over every assessment.
    pub pct_all: f64,
    /// Percentage over completed assessments (the live figure).
    pub pct_so_far: f64,
    pub next: Option<NextProjection>,
    pub plan: DistributionPlan,
    pub shortfall: ShortfallAnalysis,
    pub status: SubjectStatus,
}

impl SubjectReport {
    pub fn compute(subject: &Subject, target_pct: u32) -> Self {
        let totals = subject_totals(subject);
        let so_far = totals_so_far(subject);
        Self {
            name: subject.name.clone(),
            totals,
            so_far,
            pct_all: totals.percentage(),
            pct_so_far: so_far.percentage(),
            next: project_next(subject, target_pct),
            plan: plan_remaining(subject, target_pct),
            shortfall: analyze_shortfall(subject, target_pct),
            status: classify(subject, target_pct),
        }
    }
}

/// A complete progress report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    /// When the report was computed.
    pub created_at: DateTime<Utc>,
    pub target_pct: u32,
    pub subjects: Vec<SubjectReport>,
    pub aggregate: AggregateSummary,
}

impl ProgressReport {
    /// Check the snapshot, then derive every figure from it.
    pub fn compute(state: &ProgressState) -> Result<Self, CheckError> {
        check(state)?;

        let subjects: Vec<SubjectReport> = state
            .subjects
            .iter()
            .map(|s| SubjectReport::compute(s, state.target_pct))
            .collect();
        let aggregate = compute_aggregate(state);

        tracing::debug!(
            subjects = subjects.len(),
            overall = aggregate.overall_current_pct,
            "computed progress report"
        );

        Ok(Self {
            created_at: Utc::now(),
            target_pct: state.target_pct,
            subjects,
            aggregate,
        })
    }

    pub fn subject(&self, name: &str) -> Option<&SubjectReport> {
        self.subjects.iter().find(|s| s.name == name)
    }

    /// Number of subjects in the given state.
    pub fn count(&self, state: TrackState) -> usize {
        self.subjects
            .iter()
            .filter(|s| s.status.state == state)
            .count()
    }

    /// Other subjects that still have marks available, largest first.
    ///
    /// Used to suggest where points could be made up when `subject` is short.
    pub fn make_up_candidates(&self, subject: &str) -> Vec<&RemainingCapacity> {
        let mut candidates: Vec<_> = self
            .aggregate
            .remaining_capacity
            .iter()
            .filter(|c| c.subject != subject)
            .collect();
        candidates.sort_by(|a, b| b.remaining_max.total_cmp(&a.remaining_max));
        candidates
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Target:** {}% | **Overall so far:** {:.1}% | {} on track, {} at risk, {} off track\n\n",
            self.target_pct,
            self.aggregate.overall_current_pct,
            self.count(TrackState::On),
            self.count(TrackState::Risk),
            self.count(TrackState::Off),
        ));

        if !self.subjects.is_empty() {
            md.push_str("### Subjects\n\n");
            md.push_str("| Subject | So far | All | Status | Next | Needed |\n");
            md.push_str("|---------|--------|-----|--------|------|--------|\n");
            for s in &self.subjects {
                let (next, needed) = match &s.next {
                    Some(n) => (table_cell(&n.assessment), format!("{}/{}", n.needed, n.max)),
                    None => ("-".to_string(), "-".to_string()),
                };
                md.push_str(&format!(
                    "| {} | {:.1}% | {:.1}% | {} | {} | {} |\n",
                    table_cell(&s.name),
                    s.pct_so_far,
                    s.pct_all,
                    s.status.label,
                    next,
                    needed
                ));
            }
            md.push('\n');
        }

        for s in self.subjects.iter().filter(|s| !s.plan.is_empty()) {
            md.push_str(&format!("### Plan: {}\n\n", s.name));
            md.push_str("| Assessment | Needed | Max | Feasible |\n");
            md.push_str("|------------|--------|-----|----------|\n");
            for row in &s.plan.rows {
                md.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    table_cell(&row.assessment),
                    row.needed,
                    row.max,
                    if row.feasible { "yes" } else { "no" }
                ));
            }
            if s.shortfall.is_short() {
                md.push_str(&format!("\nShort by {} marks.\n", s.shortfall.shortfall));
            }
            md.push('\n');
        }

        md
    }
}
