//! Rebuilding subjects against a changed template.
//!
//! Records carry the name and max of the template entry at the same
//! position. When the template is replaced wholesale, every subject must be
//! rebuilt; the policy decides which old score lands on which new entry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::edit::ScorePolicy;
use crate::error::EditError;
use crate::model::{AssessmentRecord, ProgressState, Subject, TemplateEntry};

/// How old scores are carried onto a new template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconcilePolicy {
    /// The score at index `i` moves to the new entry at index `i`.
    Position,
    /// Scores follow their assessment name; entries with no name match fall
    /// back to the record at the same index when that record's name is not
    /// claimed by another new entry.
    #[default]
    Name,
}

impl fmt::Display for ReconcilePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcilePolicy::Position => write!(f, "position"),
            ReconcilePolicy::Name => write!(f, "name"),
        }
    }
}

impl FromStr for ReconcilePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "position" | "index" => Ok(ReconcilePolicy::Position),
            "name" => Ok(ReconcilePolicy::Name),
            other => Err(format!("unknown reconcile policy: {other}")),
        }
    }
}

/// Rebuild one subject's records for `template`.
pub fn reconcile_subject(
    subject: &Subject,
    template: &[TemplateEntry],
    policy: ReconcilePolicy,
) -> Subject {
    let assessments = template
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let score = match policy {
                ReconcilePolicy::Position => subject.assessments.get(i).and_then(|a| a.score),
                ReconcilePolicy::Name => score_by_name(subject, template, i, entry),
            };
            AssessmentRecord {
                name: entry.name.clone(),
                max: entry.max,
                score,
            }
        })
        .collect();

    Subject {
        name: subject.name.clone(),
        assessments,
    }
}

fn score_by_name(
    subject: &Subject,
    template: &[TemplateEntry],
    index: usize,
    entry: &TemplateEntry,
) -> Option<f64> {
    if let Some(record) = subject.assessment(&entry.name) {
        return record.score;
    }
    let fallback = subject.assessments.get(index)?;
    let claimed = template.iter().any(|e| e.name == fallback.name);
    if claimed {
        None
    } else {
        fallback.score
    }
}

impl ProgressState {
    /// A new snapshot with `template` applied to every subject.
    ///
    /// Fails when `scores` is strict and a carried-over score lands on an
    /// entry with a smaller max.
    pub fn reconciled(
        &self,
        template: Vec<TemplateEntry>,
        policy: ReconcilePolicy,
        scores: ScorePolicy,
    ) -> Result<Self, EditError> {
        let subjects: Vec<Subject> = self
            .subjects
            .iter()
            .map(|s| reconcile_subject(s, &template, policy))
            .collect();
        for record in subjects.iter().flat_map(|s| &s.assessments) {
            scores.check_record(record)?;
        }
        tracing::debug!(%policy, entries = template.len(), "reconciled subjects with template");
        Ok(Self {
            target_pct: self.target_pct,
            template,
            subjects,
        })
    }
}
