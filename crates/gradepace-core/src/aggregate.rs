//! Cross-subject summaries.
//!
//! Subjects are averaged without weighting: each subject counts once no
//! matter how many marks its template carries.

use serde::{Deserialize, Serialize};

use crate::model::ProgressState;
use crate::totals::{percentage, subject_totals, totals_so_far, Totals};

/// Average percentage scored on one template entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentAverage {
    pub name: String,
    /// `None` when no subject has a score for this entry yet.
    pub actual_pct: Option<f64>,
    /// Number of subjects contributing to the average.
    pub scored_subjects: usize,
}

/// Summed scores and maxes for one template entry across subjects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSum {
    pub name: String,
    pub total: f64,
    pub total_max: f64,
}

/// Marks still available in one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemainingCapacity {
    pub subject: String,
    pub remaining_max: f64,
}

/// All cross-subject figures for a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSummary {
    /// Unweighted mean of the completed-only subject percentages.
    pub overall_current_pct: f64,
    /// Sum of every subject's full totals.
    pub overall_totals: Totals,
    pub averages: Vec<AssessmentAverage>,
    pub sums: Vec<AssessmentSum>,
    pub remaining_capacity: Vec<RemainingCapacity>,
}

/// Unweighted mean of each subject's completed-only percentage; 0 for no subjects.
pub fn overall_current_pct(state: &ProgressState) -> f64 {
    if state.subjects.is_empty() {
        return 0.0;
    }
    let sum: f64 = state
        .subjects
        .iter()
        .map(|s| totals_so_far(s).percentage())
        .sum();
    sum / state.subjects.len() as f64
}

/// Full totals summed across subjects.
pub fn overall_totals(state: &ProgressState) -> Totals {
    state.subjects.iter().map(subject_totals).sum()
}

/// Per-template-entry average over the subjects that have a score for it.
pub fn assessment_averages(state: &ProgressState) -> Vec<AssessmentAverage> {
    state
        .template
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let pcts: Vec<f64> = state
                .subjects
                .iter()
                .filter_map(|s| s.assessments.get(i))
                .filter_map(|a| a.score.map(|score| percentage(score, f64::from(a.max))))
                .collect();
            let actual_pct = if pcts.is_empty() {
                None
            } else {
                Some(pcts.iter().sum::<f64>() / pcts.len() as f64)
            };
            AssessmentAverage {
                name: entry.name.clone(),
                actual_pct,
                scored_subjects: pcts.len(),
            }
        })
        .collect()
}

/// Per-template-entry sums across subjects; absent scores count as 0.
pub fn assessment_sums(state: &ProgressState) -> Vec<AssessmentSum> {
    state
        .template
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let (total, total_max) = state
                .subjects
                .iter()
                .filter_map(|s| s.assessments.get(i))
                .fold((0.0, 0.0), |(t, m), a| {
                    (t + a.score.unwrap_or(0.0), m + f64::from(a.max))
                });
            AssessmentSum {
                name: entry.name.clone(),
                total,
                total_max,
            }
        })
        .collect()
}

/// Pending max marks per subject, omitting subjects with nothing left.
pub fn remaining_capacity(state: &ProgressState) -> Vec<RemainingCapacity> {
    state
        .subjects
        .iter()
        .map(|s| RemainingCapacity {
            subject: s.name.clone(),
            remaining_max: s.pending().map(|a| f64::from(a.max)).sum(),
        })
        .filter(|c| c.remaining_max > 0.0)
        .collect()
}

/// Compute every cross-subject figure.
pub fn compute_aggregate(state: &ProgressState) -> AggregateSummary {
    AggregateSummary {
        overall_current_pct: overall_current_pct(state),
        overall_totals: overall_totals(state),
        averages: assessment_averages(state),
        sums: assessment_sums(state),
        remaining_capacity: remaining_capacity(state),
    }
}
