//! Reachability of the target with full marks on everything remaining.

use serde::{Deserialize, Serialize};

use crate::model::Subject;
use crate::totals::{ceil_marks, subject_totals, target_points};

/// Full-marks reachability analysis for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortfallAnalysis {
    pub earned: f64,
    pub total_max: f64,
    /// Max marks still available in pending assessments.
    pub remaining_max: f64,
    /// `earned + remaining_max`.
    pub max_possible: f64,
    /// Points required for the target over the whole template.
    pub needed_total: f64,
    /// Marks by which the target is out of reach; 0 when reachable.
    pub shortfall: u32,
}

impl ShortfallAnalysis {
    pub fn is_short(&self) -> bool {
        self.shortfall > 0
    }
}

/// Analyse whether the target can still be reached.
pub fn analyze_shortfall(subject: &Subject, target_pct: u32) -> ShortfallAnalysis {
    let totals = subject_totals(subject);
    let remaining_max: f64 = subject.pending().map(|a| f64::from(a.max)).sum();
    let max_possible = totals.earned + remaining_max;
    let needed_total = target_points(target_pct, totals.max);
    let shortfall = ceil_marks(needed_total - max_possible).max(0) as u32;

    ShortfallAnalysis {
        earned: totals.earned,
        total_max: totals.max,
        remaining_max,
        max_possible,
        needed_total,
        shortfall,
    }
}

/// Marks by which the target is unreachable even with full marks remaining.
pub fn shortfall(subject: &Subject, target_pct: u32) -> u32 {
    analyze_shortfall(subject, target_pct).shortfall
}
