//! Document decoding errors.

use thiserror::Error;

/// Errors raised while decoding a stored snapshot document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level value is not an object.
    #[error("snapshot document must be a JSON object")]
    NotAnObject,

    /// A legacy score could not be read as a number.
    #[error("subject '{subject}' has non-numeric score {value:?} at position {index}")]
    NonNumericScore {
        subject: String,
        index: usize,
        value: String,
    },
}
