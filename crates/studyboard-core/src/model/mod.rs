//! The tracked document and the snapshot derived from it.
//!
//! A [`Document`] is everything the store persists: study sessions, grades,
//! chores, plus the goals and thresholds that drive notifications. The
//! evaluator never reads a document directly; it works on a [`Snapshot`].

mod level;
mod snapshot;

pub use level::{Metric, NotificationLevel};
pub use snapshot::{ChoreMetric, GradeMetric, Snapshot, StudyGoal};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ValidationError};
use crate::thresholds::{ThresholdConfig, ThresholdSettings};

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

const DEFAULT_SUBJECT: &str = "General";
const DEFAULT_COURSE: &str = "Course";
const DEFAULT_CHORE: &str = "New chore";

fn label_or(label: &str, fallback: &str) -> String {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

fn finite(field: &str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("{value} is not a number"),
        })
    }
}

fn invalid(field: String, message: String) -> ValidationError {
    ValidationError::InvalidValue { field, message }
}

fn check_target(field: &str, target: f64) -> Result<f64, ValidationError> {
    let target = finite(field, target)?;
    if target <= MIN_SCORE || target > MAX_SCORE {
        return Err(invalid(
            field.to_string(),
            format!("target {target} must be above {MIN_SCORE} and at most {MAX_SCORE}"),
        ));
    }
    Ok(target)
}

/// One block of study time on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySession {
    pub subject: String,
    pub hours: f64,
    pub date: NaiveDate,
}

impl StudySession {
    /// Blank subjects become "General" and negative hours are clamped to 0.
    pub fn new(subject: &str, hours: f64, date: NaiveDate) -> Result<Self, ValidationError> {
        Ok(Self {
            subject: label_or(subject, DEFAULT_SUBJECT),
            hours: finite("hours", hours)?.max(0.0),
            date,
        })
    }

    /// Stored hours must be a non-negative number.
    pub fn validate(&self, field: &str) -> Result<(), ValidationError> {
        if finite(field, self.hours)? < 0.0 {
            return Err(invalid(
                field.to_string(),
                format!("{} hours cannot be negative", self.hours),
            ));
        }
        Ok(())
    }
}

/// A recorded grade and the score the user is aiming for.
///
/// Entries written without a target fall back to the document's grade goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeEntry {
    pub subject: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
}

impl GradeEntry {
    /// The score is clamped into `MIN_SCORE..=MAX_SCORE`; the target must
    /// already be a positive score.
    pub fn new(subject: &str, score: f64, target: f64) -> Result<Self, ValidationError> {
        let score = finite("score", score)?.clamp(MIN_SCORE, MAX_SCORE);
        let target = check_target("target", target)?;
        Ok(Self {
            subject: label_or(subject, DEFAULT_COURSE),
            score,
            target: Some(target),
        })
    }

    pub fn target_or(&self, goal: f64) -> f64 {
        self.target.unwrap_or(goal)
    }

    /// Stored entries are not clamped, so a hand-edited score or target is
    /// checked against the same bounds [`GradeEntry::new`] enforces.
    pub fn validate(&self, field: &str) -> Result<(), ValidationError> {
        let score_field = format!("{field}.score");
        let score = finite(&score_field, self.score)?;
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(invalid(
                score_field,
                format!("score {score} is outside {MIN_SCORE}..={MAX_SCORE}"),
            ));
        }
        if let Some(target) = self.target {
            check_target(&format!("{field}.target"), target)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoreStatus {
    #[default]
    Pending,
    Done,
}

impl ChoreStatus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Done,
            Self::Done => Self::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chore {
    pub label: String,
    #[serde(default)]
    pub status: ChoreStatus,
}

impl Chore {
    pub fn new(label: &str) -> Self {
        Self {
            label: label_or(label, DEFAULT_CHORE),
            status: ChoreStatus::Pending,
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == ChoreStatus::Done
    }
}

/// Targets the completion ratios are measured against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goals {
    #[serde(default = "default_weekly_study_hours")]
    pub weekly_study_hours: f64,
    #[serde(default = "default_grade_target")]
    pub grade_target: f64,
}

fn default_weekly_study_hours() -> f64 {
    14.0
}
fn default_grade_target() -> f64 {
    85.0
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            weekly_study_hours: default_weekly_study_hours(),
            grade_target: default_grade_target(),
        }
    }
}

/// User-editable part of the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub goals: Goals,
    #[serde(default)]
    pub thresholds: ThresholdSettings,
}

impl Settings {
    /// Check goals and thresholds, returning the validated thresholds.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-positive or non-finite goal, a
    /// grade target above `MAX_SCORE`, or an evaluation error for malformed
    /// cutoffs.
    pub fn validate(&self) -> Result<ThresholdConfig, CoreError> {
        let positive = |field: &str, value: f64| -> Result<(), ValidationError> {
            if finite(field, value)? <= 0.0 {
                return Err(ValidationError::InvalidValue {
                    field: field.to_string(),
                    message: format!("{value} must be greater than zero"),
                });
            }
            Ok(())
        };
        positive("goals.weekly_study_hours", self.goals.weekly_study_hours)?;
        positive("goals.grade_target", self.goals.grade_target)?;
        if self.goals.grade_target > MAX_SCORE {
            return Err(ValidationError::InvalidValue {
                field: "goals.grade_target".to_string(),
                message: format!("{} exceeds the maximum score {MAX_SCORE}", self.goals.grade_target),
            }
            .into());
        }
        Ok(self.thresholds.validate()?)
    }
}

/// The whole persisted dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub study_sessions: Vec<StudySession>,
    #[serde(default)]
    pub grades: Vec<GradeEntry>,
    #[serde(default)]
    pub chores: Vec<Chore>,
    #[serde(default)]
    pub settings: Settings,
}

impl Document {
    /// Check settings and every tracked entry, returning the validated
    /// thresholds.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting, or a validation error naming the
    /// offending entry (for example `grades[2].score`).
    pub fn validate(&self) -> Result<ThresholdConfig, CoreError> {
        let thresholds = self.settings.validate()?;
        for (i, session) in self.study_sessions.iter().enumerate() {
            session.validate(&format!("study_sessions[{i}].hours"))?;
        }
        for (i, grade) in self.grades.iter().enumerate() {
            grade.validate(&format!("grades[{i}]"))?;
        }
        Ok(thresholds)
    }

    /// Flip the chore at `index` and return its new status.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfBounds`] if no chore has that index.
    pub fn toggle_chore(&mut self, index: usize) -> Result<ChoreStatus, ValidationError> {
        let len = self.chores.len();
        let chore = self
            .chores
            .get_mut(index)
            .ok_or_else(|| ValidationError::OutOfBounds {
                collection: "chores".to_string(),
                index,
                len,
            })?;
        chore.status = chore.status.toggled();
        Ok(chore.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn study_session_defaults_blank_subject_and_clamps_hours() {
        let session = StudySession::new("   ", -2.0, day("2026-10-19")).unwrap();
        assert_eq!(session.subject, "General");
        assert_eq!(session.hours, 0.0);
    }

    #[test]
    fn study_session_rejects_nan_hours() {
        assert!(StudySession::new("Math", f64::NAN, day("2026-10-19")).is_err());
    }

    #[test]
    fn grade_score_is_clamped_into_range() {
        assert_eq!(GradeEntry::new("Math", 120.0, 90.0).unwrap().score, 100.0);
        assert_eq!(GradeEntry::new("Math", -5.0, 90.0).unwrap().score, 0.0);
        assert_eq!(GradeEntry::new("", 70.0, 90.0).unwrap().subject, "Course");
    }

    #[test]
    fn grade_target_must_be_positive_score() {
        assert!(GradeEntry::new("Math", 70.0, 0.0).is_err());
        assert!(GradeEntry::new("Math", 70.0, 101.0).is_err());
    }

    #[test]
    fn toggle_chore_flips_status() {
        let mut doc = Document::default();
        doc.chores.push(Chore::new("Clean desk"));
        assert!(!doc.chores[0].is_done());
        assert_eq!(doc.toggle_chore(0).unwrap(), ChoreStatus::Done);
        assert!(doc.chores[0].is_done());
        assert_eq!(doc.toggle_chore(0).unwrap(), ChoreStatus::Pending);
    }

    #[test]
    fn toggle_chore_out_of_bounds() {
        let mut doc = Document::default();
        let err = doc.toggle_chore(3).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfBounds { index: 3, len: 0, .. }
        ));
    }

    #[test]
    fn settings_reject_zero_study_goal() {
        let mut settings = Settings::default();
        settings.goals.weekly_study_hours = 0.0;
        assert!(matches!(
            settings.validate(),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn settings_reject_inverted_thresholds() {
        let mut settings = Settings::default();
        settings.thresholds.study.critical = 1.0;
        assert!(matches!(
            settings.validate(),
            Err(CoreError::Evaluation(_))
        ));
    }

    #[test]
    fn empty_json_document_uses_defaults() {
        let doc: Document = serde_json::from_str("{}").unwrap();
        assert!(doc.chores.is_empty());
        assert_eq!(doc.settings.goals.weekly_study_hours, 14.0);
        assert_eq!(doc.settings.goals.grade_target, 85.0);
    }

    fn field_of(err: CoreError) -> String {
        match err {
            CoreError::Validation(ValidationError::InvalidValue { field, .. }) => field,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn document_rejects_stored_score_out_of_range() {
        let doc: Document = serde_json::from_str(
            r#"{"grades": [{"subject": "Math", "score": 90, "target": 85},
                           {"subject": "Art", "score": 500, "target": 85}]}"#,
        )
        .unwrap();
        assert_eq!(field_of(doc.validate().unwrap_err()), "grades[1].score");
    }

    #[test]
    fn document_rejects_stored_non_positive_target() {
        let doc: Document = serde_json::from_str(
            r#"{"grades": [{"subject": "Math", "score": 90, "target": 0}]}"#,
        )
        .unwrap();
        assert_eq!(field_of(doc.validate().unwrap_err()), "grades[0].target");

        let doc: Document = serde_json::from_str(
            r#"{"grades": [{"subject": "Math", "score": 90, "target": -10}]}"#,
        )
        .unwrap();
        assert_eq!(field_of(doc.validate().unwrap_err()), "grades[0].target");
    }

    #[test]
    fn document_rejects_stored_negative_hours() {
        let doc: Document = serde_json::from_str(
            r#"{"study_sessions": [{"subject": "Math", "hours": -3, "date": "2026-10-19"}]}"#,
        )
        .unwrap();
        assert_eq!(
            field_of(doc.validate().unwrap_err()),
            "study_sessions[0].hours"
        );
    }

    #[test]
    fn document_with_valid_entries_passes() {
        let mut doc = Document::default();
        doc.study_sessions
            .push(StudySession::new("Math", 2.0, day("2026-10-19")).unwrap());
        doc.grades.push(GradeEntry::new("Math", 100.0, 85.0).unwrap());
        doc.grades.push(GradeEntry::new("Art", 0.0, 100.0).unwrap());
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn grade_without_target_parses_and_uses_goal() {
        let doc: Document =
            serde_json::from_str(r#"{"grades": [{"subject": "Math", "score": 90}]}"#).unwrap();
        assert_eq!(doc.grades[0].target, None);
        assert_eq!(doc.grades[0].target_or(85.0), 85.0);
        assert!(doc.validate().is_ok());

        let json = serde_json::to_value(&doc.grades[0]).unwrap();
        assert!(json.get("target").is_none());
    }

    #[test]
    fn chore_status_serializes_snake_case() {
        let chore = Chore::new("Trash");
        let json = serde_json::to_value(&chore).unwrap();
        assert_eq!(json["status"], "pending");
    }
}
