//! Core data model types for gradepace.
//!
//! A [`ProgressState`] is an immutable snapshot: the target percentage, the
//! assessment template shared by every subject, and the subjects with their
//! scores. Every computation in this crate derives values from a snapshot and
//! never mutates it.

use serde::{Deserialize, Serialize};

/// Lowest selectable target percentage.
pub const MIN_TARGET_PCT: u32 = 60;
/// Highest selectable target percentage.
pub const MAX_TARGET_PCT: u32 = 100;
/// Target percentages move in steps of this size.
pub const TARGET_PCT_STEP: u32 = 5;
/// Target used for fresh states.
pub const DEFAULT_TARGET_PCT: u32 = 70;

/// Returns `true` if `pct` is a selectable target (60..=100, step 5).
pub fn is_valid_target(pct: u32) -> bool {
    (MIN_TARGET_PCT..=MAX_TARGET_PCT).contains(&pct) && pct % TARGET_PCT_STEP == 0
}

/// One assessment definition in the shared template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// Assessment name (e.g. "CIA1").
    pub name: String,
    /// Maximum marks, at least 1.
    pub max: u32,
}

impl TemplateEntry {
    pub fn new(name: impl Into<String>, max: u32) -> Self {
        Self {
            name: name.into(),
            max,
        }
    }
}

/// The template applied to fresh states and to migrated legacy documents.
pub fn default_template() -> Vec<TemplateEntry> {
    vec![
        TemplateEntry::new("CIA1", 15),
        TemplateEntry::new("CIA2", 25),
        TemplateEntry::new("CIA3", 15),
        TemplateEntry::new("CIA4", 30),
        TemplateEntry::new("CP", 15),
    ]
}

/// A subject's record for one template entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    /// Mirrors the template entry name at the same position.
    pub name: String,
    /// Mirrors the template entry max at the same position.
    pub max: u32,
    /// `None` while the assessment is pending.
    #[serde(default)]
    pub score: Option<f64>,
}

impl AssessmentRecord {
    /// A pending record for the given template entry.
    pub fn pending(entry: &TemplateEntry) -> Self {
        Self {
            name: entry.name.clone(),
            max: entry.max,
            score: None,
        }
    }

    /// A completed record for the given template entry.
    pub fn scored(entry: &TemplateEntry, score: f64) -> Self {
        Self {
            name: entry.name.clone(),
            max: entry.max,
            score: Some(score),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.score.is_none()
    }

    pub fn is_completed(&self) -> bool {
        self.score.is_some()
    }
}

/// A subject with one record per template entry, in template order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    #[serde(default)]
    pub assessments: Vec<AssessmentRecord>,
}

impl Subject {
    /// A subject with every assessment pending.
    pub fn from_template(name: impl Into<String>, template: &[TemplateEntry]) -> Self {
        Self {
            name: name.into(),
            assessments: template.iter().map(AssessmentRecord::pending).collect(),
        }
    }

    /// Look up a record by assessment name.
    pub fn assessment(&self, name: &str) -> Option<&AssessmentRecord> {
        self.assessments.iter().find(|a| a.name == name)
    }

    /// Pending records in template order.
    pub fn pending(&self) -> impl Iterator<Item = &AssessmentRecord> {
        self.assessments.iter().filter(|a| a.is_pending())
    }

    /// Completed records in template order.
    pub fn completed(&self) -> impl Iterator<Item = &AssessmentRecord> {
        self.assessments.iter().filter(|a| a.is_completed())
    }
}

/// A complete progress snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    /// Target overall percentage (60..=100, step 5).
    pub target_pct: u32,
    /// Shared assessment structure.
    pub template: Vec<TemplateEntry>,
    /// Subjects, each positionally synchronized with `template`.
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

impl ProgressState {
    pub fn new(target_pct: u32, template: Vec<TemplateEntry>, subjects: Vec<Subject>) -> Self {
        Self {
            target_pct,
            template,
            subjects,
        }
    }

    /// A fresh state: default target, default template, one empty subject.
    pub fn fresh() -> Self {
        let template = default_template();
        let subject = Subject::from_template("Subject 1", &template);
        Self::new(DEFAULT_TARGET_PCT, template, vec![subject])
    }

    /// Look up a subject by name.
    pub fn subject(&self, name: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.name == name)
    }

    /// Sum of every template entry's max.
    pub fn template_total(&self) -> u32 {
        self.template.iter().map(|e| e.max).sum()
    }
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::fresh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_validation() {
        assert!(is_valid_target(60));
        assert!(is_valid_target(70));
        assert!(is_valid_target(100));
        assert!(!is_valid_target(55));
        assert!(!is_valid_target(72));
        assert!(!is_valid_target(105));
    }

    #[test]
    fn fresh_state_has_one_pending_subject() {
        let state = ProgressState::fresh();
        assert_eq!(state.target_pct, 70);
        assert_eq!(state.template_total(), 100);
        assert_eq!(state.subjects.len(), 1);
        assert_eq!(state.subjects[0].name, "Subject 1");
        assert_eq!(state.subjects[0].pending().count(), 5);
    }

    #[test]
    fn json_shape_uses_camel_case_and_null_scores() {
        let state = ProgressState::fresh();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["targetPct"], 70);
        assert_eq!(json["template"][0]["name"], "CIA1");
        assert!(json["subjects"][0]["assessments"][0]["score"].is_null());
    }

    #[test]
    fn missing_score_field_means_pending() {
        let json = r#"{
            "targetPct": 75,
            "template": [{"name": "Quiz", "max": 10}],
            "subjects": [{"name": "Maths", "assessments": [{"name": "Quiz", "max": 10}]}]
        }"#;
        let state: ProgressState = serde_json::from_str(json).unwrap();
        assert!(state.subjects[0].assessments[0].is_pending());
        assert_eq!(state.subject("Maths").unwrap().pending().count(), 1);
    }
}
