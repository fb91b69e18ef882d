//! Shared fixtures for unit tests.

use crate::model::{default_template, AssessmentRecord, ProgressState, Subject};

/// A subject on the default template with the given scores, by position.
pub fn subject(scores: &[Option<f64>]) -> Subject {
    named_subject("Physics", scores)
}

pub fn named_subject(name: &str, scores: &[Option<f64>]) -> Subject {
    let template = default_template();
    assert_eq!(scores.len(), template.len(), "one score slot per entry");
    Subject {
        name: name.into(),
        assessments: template
            .iter()
            .zip(scores)
            .map(|(e, s)| AssessmentRecord {
                name: e.name.clone(),
                max: e.max,
                score: *s,
            })
            .collect(),
    }
}

/// A state on the default template.
pub fn state(target_pct: u32, subjects: Vec<Subject>) -> ProgressState {
    ProgressState::new(target_pct, default_template(), subjects)
}
