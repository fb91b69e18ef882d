//! Snapshot checks and validation warnings.
//!
//! [`check`] rejects snapshots the projections cannot interpret; [`validate`]
//! reports softer issues that still produce defined results.

use std::collections::HashSet;

use crate::error::CheckError;
use crate::model::{is_valid_target, ProgressState};

/// Reject a snapshot that breaks the shape the projections assume.
pub fn check(state: &ProgressState) -> Result<(), CheckError> {
    if !is_valid_target(state.target_pct) {
        return Err(CheckError::TargetOutOfRange(state.target_pct));
    }
    if state.template.is_empty() {
        return Err(CheckError::EmptyTemplate);
    }
    if let Some(entry) = state.template.iter().find(|e| e.max == 0) {
        return Err(CheckError::ZeroMax(entry.name.clone()));
    }

    for subject in &state.subjects {
        if subject.assessments.len() != state.template.len() {
            return Err(CheckError::AssessmentCount {
                subject: subject.name.clone(),
                expected: state.template.len(),
                found: subject.assessments.len(),
            });
        }
        for (index, (entry, record)) in state
            .template
            .iter()
            .zip(&subject.assessments)
            .enumerate()
        {
            if entry.name != record.name || entry.max != record.max {
                return Err(CheckError::AssessmentMismatch {
                    subject: subject.name.clone(),
                    index,
                    expected: format!("{}/{}", entry.name, entry.max),
                    found: format!("{}/{}", record.name, record.max),
                });
            }
            if let Some(score) = record.score {
                if !score.is_finite() || score < 0.0 {
                    return Err(CheckError::InvalidScore {
                        subject: subject.name.clone(),
                        assessment: record.name.clone(),
                        score,
                    });
                }
            }
        }
    }

    Ok(())
}

/// A warning from snapshot validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// The subject concerned (if applicable).
    pub subject: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a snapshot for issues that do not prevent projection.
pub fn validate(state: &ProgressState) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if state.subjects.is_empty() {
        warnings.push(ValidationWarning {
            subject: None,
            message: "no subjects defined".into(),
        });
    }

    let mut seen_entries = HashSet::new();
    for entry in &state.template {
        if !seen_entries.insert(entry.name.as_str()) {
            warnings.push(ValidationWarning {
                subject: None,
                message: format!("duplicate template entry: {}", entry.name),
            });
        }
    }

    let mut seen_subjects = HashSet::new();
    for subject in &state.subjects {
        if subject.name.trim().is_empty() {
            warnings.push(ValidationWarning {
                subject: Some(subject.name.clone()),
                message: "subject name is empty".into(),
            });
        }
        if !seen_subjects.insert(subject.name.as_str()) {
            warnings.push(ValidationWarning {
                subject: Some(subject.name.clone()),
                message: format!("duplicate subject: {}", subject.name),
            });
        }
    }

    // Scores above max are tolerated and push percentages past 100.
    for subject in &state.subjects {
        for record in &subject.assessments {
            if let Some(score) = record.score {
                if score > f64::from(record.max) {
                    warnings.push(ValidationWarning {
                        subject: Some(subject.name.clone()),
                        message: format!(
                            "{} scored {} out of {} (above max)",
                            record.name, score, record.max
                        ),
                    });
                }
            }
        }
    }

    warnings
}
