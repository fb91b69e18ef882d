//! Snapshot document encoding and legacy migration.
//!
//! Current documents serialize `ProgressState` directly. Older documents have
//! no `template` field: their subjects carry bare assessment lists, and the
//! default template is applied to them by position.

use serde::Deserialize;
use serde_json::Value;

use gradepace_core::model::{
    default_template, AssessmentRecord, ProgressState, Subject, DEFAULT_TARGET_PCT,
};

use crate::error::DocumentError;

/// Result of decoding a stored document.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub state: ProgressState,
    /// `true` if the document was in the legacy shape.
    pub migrated: bool,
}

/// Intermediate structure for legacy documents.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyDocument {
    #[serde(default = "default_target")]
    target_pct: u32,
    #[serde(default)]
    subjects: Vec<LegacySubject>,
}

fn default_target() -> u32 {
    DEFAULT_TARGET_PCT
}

#[derive(Debug, Deserialize)]
struct LegacySubject {
    name: String,
    #[serde(default)]
    assessments: Vec<LegacyAssessment>,
}

#[derive(Debug, Deserialize)]
struct LegacyAssessment {
    #[serde(default)]
    score: Option<LegacyScore>,
}

/// Legacy scores were sometimes stored as text straight from an input field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LegacyScore {
    Number(f64),
    Text(String),
}

/// Decode a snapshot document, migrating the legacy shape if needed.
pub fn decode_document(content: &str) -> Result<Decoded, DocumentError> {
    let value: Value = serde_json::from_str(content)?;
    let Some(object) = value.as_object() else {
        return Err(DocumentError::NotAnObject);
    };

    if object.contains_key("template") {
        let state: ProgressState = serde_json::from_value(value)?;
        return Ok(Decoded {
            state,
            migrated: false,
        });
    }

    let legacy: LegacyDocument = serde_json::from_value(value)?;
    Ok(Decoded {
        state: migrate_legacy(legacy)?,
        migrated: true,
    })
}

/// Encode a snapshot as pretty-printed JSON.
pub fn encode_document(state: &ProgressState) -> Result<String, DocumentError> {
    Ok(serde_json::to_string_pretty(state)?)
}

fn migrate_legacy(legacy: LegacyDocument) -> Result<ProgressState, DocumentError> {
    let template = default_template();

    let subjects = legacy
        .subjects
        .into_iter()
        .map(|subject| -> Result<Subject, DocumentError> {
            let assessments = template
                .iter()
                .enumerate()
                .map(|(index, entry)| -> Result<AssessmentRecord, DocumentError> {
                    let score = match subject.assessments.get(index).and_then(|a| a.score.as_ref())
                    {
                        None => None,
                        Some(LegacyScore::Number(n)) => Some(n.max(0.0)),
                        Some(LegacyScore::Text(t)) if t.trim().is_empty() => None,
                        Some(LegacyScore::Text(t)) => {
                            let non_numeric = || DocumentError::NonNumericScore {
                                subject: subject.name.clone(),
                                index,
                                value: t.clone(),
                            };
                            let n: f64 = t.trim().parse().map_err(|_| non_numeric())?;
                            if !n.is_finite() {
                                return Err(non_numeric());
                            }
                            Some(n.max(0.0))
                        }
                    };
                    Ok(AssessmentRecord {
                        name: entry.name.clone(),
                        max: entry.max,
                        score,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            if subject.assessments.len() > template.len() {
                tracing::warn!(
                    subject = %subject.name,
                    dropped = subject.assessments.len() - template.len(),
                    "legacy subject has more assessments than the default template"
                );
            }

            Ok(Subject {
                name: subject.name,
                assessments,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ProgressState::new(legacy.target_pct, template, subjects))
}
