//! Error types for snapshot checks and edits.
//!
//! Projections themselves never fail; these errors come from the boundary
//! where snapshots are checked or produced.

use thiserror::Error;

/// A snapshot that does not conform to the shape the projections assume.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckError {
    #[error("target {0}% is not a multiple of 5 between 60 and 100")]
    TargetOutOfRange(u32),

    #[error("template has no assessments")]
    EmptyTemplate,

    #[error("template entry '{0}' has max 0")]
    ZeroMax(String),

    #[error("subject '{subject}' has {found} assessments, template has {expected}")]
    AssessmentCount {
        subject: String,
        expected: usize,
        found: usize,
    },

    #[error(
        "subject '{subject}' assessment {index} is '{found}', template expects '{expected}'"
    )]
    AssessmentMismatch {
        subject: String,
        index: usize,
        expected: String,
        found: String,
    },

    #[error("subject '{subject}' has invalid score {score} for '{assessment}'")]
    InvalidScore {
        subject: String,
        assessment: String,
        score: f64,
    },
}

/// A rejected edit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("unknown subject: {0}")]
    UnknownSubject(String),

    #[error("unknown assessment: {0}")]
    UnknownAssessment(String),

    #[error("subject already exists: {0}")]
    DuplicateSubject(String),

    #[error("assessment already exists: {0}")]
    DuplicateAssessment(String),

    #[error("name must not be empty")]
    EmptyName,

    #[error("target {0}% is not a multiple of 5 between 60 and 100")]
    InvalidTarget(u32),

    #[error("max marks must be at least 1")]
    InvalidMax,

    #[error("score must be a finite number, got {0}")]
    InvalidScore(f64),

    #[error("score {score} exceeds max {max} for '{assessment}'")]
    ScoreAboveMax {
        assessment: String,
        score: f64,
        max: u32,
    },

    #[error("cannot remove the last template entry")]
    LastTemplateEntry,
}
