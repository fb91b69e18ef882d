//! Minimum score needed on the next pending assessment.
//!
//! The requirement is the score on the next assessment that, together with
//! everything already earned, reaches the target fraction of the points
//! accumulated *through* that assessment. Later assessments are ignored.

use serde::{Deserialize, Serialize};

use crate::model::{AssessmentRecord, Subject};
use crate::totals::{ceil_marks, clamp_marks, target_points, totals_so_far};

/// Projection for the next pending assessment of a subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextProjection {
    /// Position of the assessment in template order.
    pub index: usize,
    /// Assessment name.
    pub assessment: String,
    /// Unclamped requirement; negative when already ahead of pace.
    pub raw_need: i64,
    /// Requirement clamped into `0..=max`.
    pub needed: u32,
    /// Maximum marks of the assessment.
    pub max: u32,
    /// `false` when even full marks cannot keep pace.
    pub feasible: bool,
}

impl NextProjection {
    /// Clamped requirement as a percentage of the assessment's max.
    pub fn need_pct(&self) -> f64 {
        if self.max == 0 {
            return 0.0;
        }
        f64::from(self.needed) * 100.0 / f64::from(self.max)
    }
}

/// The first pending assessment in template order, with its index.
pub fn next_pending(subject: &Subject) -> Option<(usize, &AssessmentRecord)> {
    subject
        .assessments
        .iter()
        .enumerate()
        .find(|(_, a)| a.is_pending())
}

/// Project the minimum score needed on the next pending assessment.
///
/// Returns `None` when the subject is fully scored.
pub fn project_next(subject: &Subject, target_pct: u32) -> Option<NextProjection> {
    let (index, next) = next_pending(subject)?;
    let so_far = totals_so_far(subject);

    let through_next = so_far.max + f64::from(next.max);
    let raw_need = ceil_marks(target_points(target_pct, through_next) - so_far.earned);

    Some(NextProjection {
        index,
        assessment: next.name.clone(),
        raw_need,
        needed: clamp_marks(raw_need, next.max),
        max: next.max,
        feasible: raw_need <= i64::from(next.max),
    })
}
