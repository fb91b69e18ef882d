//! Tri-state pacing classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Subject;
use crate::projection::project_next;
use crate::shortfall::shortfall;

/// Share of the next assessment's max above which a subject is at risk.
pub const AT_RISK_THRESHOLD_PCT: f64 = 85.0;

/// Pacing state of a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackState {
    On,
    Risk,
    Off,
}

impl TrackState {
    pub fn label(self) -> &'static str {
        match self {
            TrackState::On => "On Track",
            TrackState::Risk => "At Risk",
            TrackState::Off => "Off Track",
        }
    }

    pub fn color(self) -> StatusColor {
        match self {
            TrackState::On => StatusColor::Green,
            TrackState::Risk => StatusColor::Amber,
            TrackState::Off => StatusColor::Red,
        }
    }
}

impl fmt::Display for TrackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display color token paired with each state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Amber,
    Red,
}

impl StatusColor {
    /// CSS color used by the HTML dashboard.
    pub fn hex(self) -> &'static str {
        match self {
            StatusColor::Green => "#22c55e",
            StatusColor::Amber => "#eab308",
            StatusColor::Red => "#ef4444",
        }
    }
}

impl fmt::Display for StatusColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusColor::Green => write!(f, "green"),
            StatusColor::Amber => write!(f, "amber"),
            StatusColor::Red => write!(f, "red"),
        }
    }
}

/// Classified status of a subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectStatus {
    pub state: TrackState,
    pub label: String,
    pub color: StatusColor,
    /// Extra detail, e.g. "short by 3".
    #[serde(default)]
    pub message: Option<String>,
}

impl SubjectStatus {
    fn new(state: TrackState, message: Option<String>) -> Self {
        Self {
            state,
            label: state.label().to_string(),
            color: state.color(),
            message,
        }
    }
}

/// Classify a subject against the target percentage.
///
/// Guards are checked in order: shortfall, fully scored, infeasible next
/// assessment, then the at-risk threshold.
pub fn classify(subject: &Subject, target_pct: u32) -> SubjectStatus {
    let short = shortfall(subject, target_pct);
    if short > 0 {
        return SubjectStatus::new(TrackState::Off, Some(format!("short by {short}")));
    }

    let Some(next) = project_next(subject, target_pct) else {
        return SubjectStatus::new(TrackState::On, None);
    };

    if !next.feasible {
        return SubjectStatus::new(
            TrackState::Off,
            Some(format!(
                "{} alone cannot keep pace (needs {} of {})",
                next.assessment, next.raw_need, next.max
            )),
        );
    }

    let need_pct = next.need_pct();
    if need_pct > AT_RISK_THRESHOLD_PCT {
        return SubjectStatus::new(
            TrackState::Risk,
            Some(format!("needs {need_pct:.0}% in {}", next.assessment)),
        );
    }

    SubjectStatus::new(TrackState::On, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::subject;

    #[test]
    fn shortfall_is_off_track_with_message() {
        let s = subject(&[Some(2.0), Some(5.0), None, None, None]);
        let status = classify(&s, 70);
        assert_eq!(status.state, TrackState::Off);
        assert_eq!(status.label, "Off Track");
        assert_eq!(status.color, StatusColor::Red);
        assert_eq!(status.message.as_deref(), Some("short by 3"));
    }

    #[test]
    fn fully_scored_is_on_track() {
        let s = subject(&[Some(15.0), Some(25.0), Some(15.0), Some(30.0), Some(15.0)]);
        let status = classify(&s, 70);
        assert_eq!(status.state, TrackState::On);
        assert_eq!(status.color, StatusColor::Green);
        assert!(status.message.is_none());
    }

    #[test]
    fn infeasible_next_without_shortfall_is_off_track() {
        // so far 0/15; CIA2 needs ceil(0.8 * 40) = 32 > 25,
        // yet 0 + 85 remaining >= 80 needed overall.
        let s = subject(&[Some(0.0), None, None, None, None]);
        assert_eq!(crate::shortfall::shortfall(&s, 80), 0);
        let status = classify(&s, 80);
        assert_eq!(status.state, TrackState::Off);
        assert!(status.message.unwrap().contains("CIA2"));
    }

    #[test]
    fn high_need_is_at_risk() {
        // so far 5/15; CIA2 needs ceil(0.7 * 40 - 5) = 23 of 25 = 92%
        let s = subject(&[Some(5.0), None, None, None, None]);
        let status = classify(&s, 70);
        assert_eq!(status.state, TrackState::Risk);
        assert_eq!(status.color, StatusColor::Amber);
    }

    #[test]
    fn exactly_threshold_is_not_at_risk() {
        // Quiz max 20, 85% target with nothing entered: needs 17 of 20 = 85%
        let s = Subject {
            name: "Chem".into(),
            assessments: vec![crate::model::AssessmentRecord {
                name: "Quiz".into(),
                max: 20,
                score: None,
            }],
        };
        assert_eq!(classify(&s, 85).state, TrackState::On);
    }

    #[test]
    fn no_data_at_default_target_is_on_track() {
        let s = subject(&[None, None, None, None, None]);
        // 11 of 15 = 73%
        assert_eq!(classify(&s, 70).state, TrackState::On);
    }

    #[test]
    fn state_serializes_to_short_tokens() {
        assert_eq!(serde_json::to_string(&TrackState::Risk).unwrap(), "\"risk\"");
        assert_eq!(StatusColor::Amber.to_string(), "amber");
    }
}
