//! Request-scoped dashboard operations.
//!
//! Each call reads the document from the store, applies one change, and
//! writes it back. Changes load through
//! [`DocumentStore::load_for_update`], so a document the store cannot
//! decode is never replaced by a default one. Nothing is cached between calls, so two handles over the
//! same store see each other's writes but never coordinate them.

use chrono::NaiveDate;
use serde::Serialize;

use crate::dot_path::{display_value, get_json_value_by_path, set_json_value_by_path};
use crate::error::{ConfigError, Result};
use crate::evaluator::{evaluate, Evaluation};
use crate::model::{Chore, Document, GradeEntry, Settings, Snapshot, StudySession};
use crate::notifications::{build_notifications, Notification};
use crate::storage::DocumentStore;

const DEFAULT_STUDY_WINDOW_DAYS: u32 = 7;

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub as_of: NaiveDate,
    pub snapshot: Snapshot,
    pub evaluation: Evaluation,
    pub notifications: Vec<Notification>,
}

pub struct Dashboard<S> {
    store: S,
    study_window_days: u32,
}

impl<S: DocumentStore> Dashboard<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            study_window_days: DEFAULT_STUDY_WINDOW_DAYS,
        }
    }

    pub fn with_study_window(mut self, days: u32) -> Self {
        self.study_window_days = days.max(1);
        self
    }

    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn document(&self) -> Result<Document> {
        Ok(self.store.load()?)
    }

    /// Evaluate the current document as of `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read, the stored settings or
    /// entries are invalid, or a metric cannot be evaluated.
    pub fn status(&self, today: NaiveDate) -> Result<StatusReport> {
        let doc = self.store.load()?;
        let thresholds = doc.validate()?;
        let snapshot = Snapshot::from_document(&doc, today, self.study_window_days);
        let evaluation = evaluate(&snapshot, &thresholds)?;
        let notifications = build_notifications(&snapshot, &evaluation);
        tracing::debug!(overall = evaluation.overall.as_str(), %today, "status evaluated");

        Ok(StatusReport {
            as_of: today,
            snapshot,
            evaluation,
            notifications,
        })
    }

    /// # Errors
    /// Returns an error for non-numeric hours or if the store fails.
    pub fn add_study_session(
        &self,
        subject: &str,
        hours: f64,
        date: NaiveDate,
    ) -> Result<StudySession> {
        let session = StudySession::new(subject, hours, date)?;
        let mut doc = self.store.load_for_update()?;
        doc.study_sessions.push(session.clone());
        self.store.save(&doc)?;
        tracing::info!(subject = %session.subject, hours = session.hours, %date, "study session added");
        Ok(session)
    }

    /// Record a grade; `target` defaults to the document's grade goal.
    ///
    /// # Errors
    /// Returns an error for an invalid score or target, or if the store fails.
    pub fn add_grade(&self, subject: &str, score: f64, target: Option<f64>) -> Result<GradeEntry> {
        let mut doc = self.store.load_for_update()?;
        let target = target.unwrap_or(doc.settings.goals.grade_target);
        let grade = GradeEntry::new(subject, score, target)?;
        doc.grades.push(grade.clone());
        self.store.save(&doc)?;
        tracing::info!(subject = %grade.subject, score = grade.score, "grade added");
        Ok(grade)
    }

    /// # Errors
    /// Returns an error if the store fails.
    pub fn add_chore(&self, label: &str) -> Result<Chore> {
        let chore = Chore::new(label);
        let mut doc = self.store.load_for_update()?;
        doc.chores.push(chore.clone());
        self.store.save(&doc)?;
        tracing::info!(label = %chore.label, "chore added");
        Ok(chore)
    }

    /// Flip a chore between pending and done.
    ///
    /// # Errors
    /// Returns an out-of-bounds error (and saves nothing) for an unknown
    /// index, or an error if the store fails.
    pub fn toggle_chore(&self, index: usize) -> Result<Chore> {
        let mut doc = self.store.load_for_update()?;
        let status = doc.toggle_chore(index)?;
        self.store.save(&doc)?;
        tracing::info!(index, status = ?status, "chore toggled");
        Ok(doc.chores[index].clone())
    }

    /// Current settings value at a dot-separated key.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn setting(&self, key: &str) -> Result<Option<String>> {
        let doc = self.store.load()?;
        let json = serde_json::to_value(&doc.settings)?;
        Ok(get_json_value_by_path(&json, key).map(display_value))
    }

    /// Change one settings value, refusing changes that leave the goals or
    /// thresholds invalid.
    ///
    /// # Errors
    /// Returns an error for an unknown key, an unparsable value, a setting
    /// that fails validation, or a store failure.
    pub fn set_setting(&self, key: &str, value: &str) -> Result<Settings> {
        let mut doc = self.store.load_for_update()?;
        let mut json = serde_json::to_value(&doc.settings)?;
        set_json_value_by_path(&mut json, key, value)?;
        let updated: Settings =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;

        doc.settings = updated.clone();
        self.store.save(&doc)?;
        tracing::info!(key, value, "setting changed");
        Ok(updated)
    }

    /// Restore default goals and thresholds, keeping tracked data.
    ///
    /// # Errors
    /// Returns an error if the store fails.
    pub fn reset_settings(&self) -> Result<Settings> {
        let mut doc = self.store.load_for_update()?;
        doc.settings = Settings::default();
        self.store.save(&doc)?;
        Ok(doc.settings)
    }
}
