//! Earned/possible point totals per subject.

use serde::{Deserialize, Serialize};

use crate::model::Subject;

/// Earned and possible points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub earned: f64,
    pub max: f64,
}

impl Totals {
    /// `earned / max * 100`, or 0 when nothing is possible.
    pub fn percentage(&self) -> f64 {
        percentage(self.earned, self.max)
    }
}

impl std::ops::Add for Totals {
    type Output = Totals;

    fn add(self, rhs: Totals) -> Totals {
        Totals {
            earned: self.earned + rhs.earned,
            max: self.max + rhs.max,
        }
    }
}

impl std::iter::Sum for Totals {
    fn sum<I: Iterator<Item = Totals>>(iter: I) -> Totals {
        iter.fold(Totals::default(), |acc, t| acc + t)
    }
}

/// Percentage with a zero denominator defined as 0.
pub fn percentage(earned: f64, max: f64) -> f64 {
    if max > 0.0 {
        earned / max * 100.0
    } else {
        0.0
    }
}

/// Totals over every assessment: pending ones add to `max` but not `earned`.
pub fn subject_totals(subject: &Subject) -> Totals {
    subject
        .assessments
        .iter()
        .map(|a| Totals {
            earned: a.score.unwrap_or(0.0),
            max: f64::from(a.max),
        })
        .sum()
}

/// Totals restricted to completed assessments.
pub fn totals_so_far(subject: &Subject) -> Totals {
    subject
        .completed()
        .map(|a| Totals {
            earned: a.score.unwrap_or(0.0),
            max: f64::from(a.max),
        })
        .sum()
}

/// Points corresponding to `target_pct` percent of `points`.
///
/// Multiplies before dividing so integral inputs stay exact.
pub(crate) fn target_points(target_pct: u32, points: f64) -> f64 {
    f64::from(target_pct) * points / 100.0
}

/// Round a mark requirement upward. Requirements are never rounded down.
pub(crate) fn ceil_marks(value: f64) -> i64 {
    value.ceil() as i64
}

/// Clamp a raw requirement into `0..=max`.
pub(crate) fn clamp_marks(raw: i64, max: u32) -> u32 {
    raw.clamp(0, i64::from(max)) as u32
}
