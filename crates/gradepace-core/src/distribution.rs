//! Minimum marks needed in every pending assessment.
//!
//! The next pending assessment is assumed to score exactly its pace
//! requirement (see [`crate::projection`]). Whatever is still missing from the
//! subject-wide target after that is spread across the other pending
//! assessments in proportion to their max marks. Every row is rounded up
//! independently, so the rows may sum to slightly more than the deficit.

use serde::{Deserialize, Serialize};

use crate::model::Subject;
use crate::projection::project_next;
use crate::totals::{ceil_marks, clamp_marks, subject_totals, target_points};

/// One row of a remaining-assessments plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRow {
    pub assessment: String,
    /// Clamped requirement, always within `0..=max`.
    pub needed: u32,
    pub max: u32,
    pub feasible: bool,
}

/// A full plan for a subject's pending assessments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionPlan {
    /// Sum of present scores.
    pub earned: f64,
    /// Sum of every template max.
    pub max: f64,
    /// Target fraction of `max`.
    pub target_points: f64,
    /// Deficit left for the assessments after the next one.
    pub need_after_next: i64,
    /// The next assessment first, then the rest in template order.
    pub rows: Vec<PlanRow>,
}

impl DistributionPlan {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of the clamped requirements over every row.
    pub fn total_needed(&self) -> u32 {
        self.rows.iter().map(|r| r.needed).sum()
    }

    /// Returns `true` if every row can be met.
    pub fn all_feasible(&self) -> bool {
        self.rows.iter().all(|r| r.feasible)
    }
}

/// Build the remaining-assessments plan for a subject.
pub fn plan_remaining(subject: &Subject, target_pct: u32) -> DistributionPlan {
    let totals = subject_totals(subject);
    let goal = target_points(target_pct, totals.max);

    let Some(next) = project_next(subject, target_pct) else {
        return DistributionPlan {
            earned: totals.earned,
            max: totals.max,
            target_points: goal,
            need_after_next: 0,
            rows: Vec::new(),
        };
    };

    let earned_after_next = totals.earned + f64::from(next.needed);

    let remaining: Vec<_> = subject
        .assessments
        .iter()
        .enumerate()
        .filter(|(i, a)| *i != next.index && a.is_pending())
        .map(|(_, a)| a)
        .collect();
    let rem_total_max: u32 = remaining.iter().map(|a| a.max).sum();

    let need_after_next = ceil_marks(goal - earned_after_next).max(0);

    let mut rows = Vec::with_capacity(remaining.len() + 1);
    rows.push(PlanRow {
        assessment: next.assessment.clone(),
        needed: next.needed,
        max: next.max,
        feasible: next.feasible,
    });

    for a in remaining {
        let share = if rem_total_max > 0 {
            ceil_marks(need_after_next as f64 * f64::from(a.max) / f64::from(rem_total_max))
        } else {
            0
        };
        rows.push(PlanRow {
            assessment: a.name.clone(),
            needed: clamp_marks(share, a.max),
            max: a.max,
            feasible: (0..=i64::from(a.max)).contains(&share),
        });
    }

    tracing::trace!(
        subject = %subject.name,
        need_after_next,
        rem_total_max,
        "planned remaining assessments"
    );

    DistributionPlan {
        earned: totals.earned,
        max: totals.max,
        target_points: goal,
        need_after_next,
        rows,
    }
}
