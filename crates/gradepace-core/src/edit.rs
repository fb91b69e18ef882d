//! Pure editing transformations.
//!
//! Every edit takes a snapshot by reference and returns a new snapshot, so
//! the original stays valid and any sequence of edits can be replayed.

use serde::{Deserialize, Serialize};

use crate::error::EditError;
use crate::model::{is_valid_target, AssessmentRecord, ProgressState, Subject, TemplateEntry};

/// How entered scores are bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePolicy {
    /// Accept scores above an assessment's max (bonus marks).
    pub allow_over_max: bool,
}

impl Default for ScorePolicy {
    fn default() -> Self {
        Self {
            allow_over_max: true,
        }
    }
}

impl ScorePolicy {
    /// Normalize an entered score: negative values floor at 0.
    pub fn apply(&self, record: &AssessmentRecord, score: f64) -> Result<f64, EditError> {
        if !score.is_finite() {
            return Err(EditError::InvalidScore(score));
        }
        let score = score.max(0.0);
        if !self.allow_over_max && score > f64::from(record.max) {
            return Err(EditError::ScoreAboveMax {
                assessment: record.name.clone(),
                score,
                max: record.max,
            });
        }
        Ok(score)
    }

    /// Reject a stored score that sits above its record's max.
    pub fn check_record(&self, record: &AssessmentRecord) -> Result<(), EditError> {
        match record.score {
            Some(score) if !self.allow_over_max && score > f64::from(record.max) => {
                Err(EditError::ScoreAboveMax {
                    assessment: record.name.clone(),
                    score,
                    max: record.max,
                })
            }
            _ => Ok(()),
        }
    }
}

fn clean_name(name: &str) -> Result<String, EditError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(EditError::EmptyName)
    } else {
        Ok(trimmed.to_string())
    }
}

impl ProgressState {
    fn subject_index(&self, name: &str) -> Result<usize, EditError> {
        self.subjects
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| EditError::UnknownSubject(name.to_string()))
    }

    fn entry_index(&self, name: &str) -> Result<usize, EditError> {
        self.template
            .iter()
            .position(|e| e.name == name)
            .ok_or_else(|| EditError::UnknownAssessment(name.to_string()))
    }

    /// Change the target percentage.
    pub fn with_target(&self, target_pct: u32) -> Result<Self, EditError> {
        if !is_valid_target(target_pct) {
            return Err(EditError::InvalidTarget(target_pct));
        }
        let mut next = self.clone();
        next.target_pct = target_pct;
        Ok(next)
    }

    /// Enter (`Some`) or clear (`None`) a score.
    pub fn with_score(
        &self,
        subject: &str,
        assessment: &str,
        score: Option<f64>,
        policy: ScorePolicy,
    ) -> Result<Self, EditError> {
        let si = self.subject_index(subject)?;
        let ai = self.subjects[si]
            .assessments
            .iter()
            .position(|a| a.name == assessment)
            .ok_or_else(|| EditError::UnknownAssessment(assessment.to_string()))?;

        let score = score
            .map(|s| policy.apply(&self.subjects[si].assessments[ai], s))
            .transpose()?;

        let mut next = self.clone();
        next.subjects[si].assessments[ai].score = score;
        Ok(next)
    }

    /// Append a subject with every assessment pending.
    pub fn add_subject(&self, name: &str) -> Result<Self, EditError> {
        let name = clean_name(name)?;
        if self.subject(&name).is_some() {
            return Err(EditError::DuplicateSubject(name));
        }
        let mut next = self.clone();
        next.subjects.push(Subject::from_template(name, &self.template));
        Ok(next)
    }

    pub fn remove_subject(&self, name: &str) -> Result<Self, EditError> {
        let si = self.subject_index(name)?;
        let mut next = self.clone();
        next.subjects.remove(si);
        Ok(next)
    }

    pub fn rename_subject(&self, from: &str, to: &str) -> Result<Self, EditError> {
        let si = self.subject_index(from)?;
        let to = clean_name(to)?;
        if to != from && self.subject(&to).is_some() {
            return Err(EditError::DuplicateSubject(to));
        }
        let mut next = self.clone();
        next.subjects[si].name = to;
        Ok(next)
    }

    /// Append a template entry; every subject gains a pending record.
    pub fn add_template_entry(&self, name: &str, max: u32) -> Result<Self, EditError> {
        let name = clean_name(name)?;
        if max == 0 {
            return Err(EditError::InvalidMax);
        }
        if self.template.iter().any(|e| e.name == name) {
            return Err(EditError::DuplicateAssessment(name));
        }
        let entry = TemplateEntry::new(name, max);
        let mut next = self.clone();
        for subject in &mut next.subjects {
            subject.assessments.push(AssessmentRecord::pending(&entry));
        }
        next.template.push(entry);
        Ok(next)
    }

    /// Remove a template entry and the matching record from every subject.
    pub fn remove_template_entry(&self, name: &str) -> Result<Self, EditError> {
        let ei = self.entry_index(name)?;
        if self.template.len() == 1 {
            return Err(EditError::LastTemplateEntry);
        }
        let mut next = self.clone();
        next.template.remove(ei);
        for subject in &mut next.subjects {
            if ei < subject.assessments.len() {
                subject.assessments.remove(ei);
            }
        }
        Ok(next)
    }

    /// Rename a template entry; scores stay with their records.
    pub fn rename_template_entry(&self, from: &str, to: &str) -> Result<Self, EditError> {
        let ei = self.entry_index(from)?;
        let to = clean_name(to)?;
        if to != from && self.template.iter().any(|e| e.name == to) {
            return Err(EditError::DuplicateAssessment(to));
        }
        let mut next = self.clone();
        next.template[ei].name = to.clone();
        for subject in &mut next.subjects {
            if let Some(record) = subject.assessments.get_mut(ei) {
                record.name = to.clone();
            }
        }
        Ok(next)
    }

    /// Change the max marks of a template entry; existing scores are kept.
    ///
    /// Under a strict policy, lowering the max below an entered score fails.
    pub fn set_template_max(
        &self,
        name: &str,
        max: u32,
        policy: ScorePolicy,
    ) -> Result<Self, EditError> {
        let ei = self.entry_index(name)?;
        if max == 0 {
            return Err(EditError::InvalidMax);
        }
        let mut next = self.clone();
        next.template[ei].max = max;
        for subject in &mut next.subjects {
            if let Some(record) = subject.assessments.get_mut(ei) {
                record.max = max;
                policy.check_record(record)?;
            }
        }
        Ok(next)
    }
}
