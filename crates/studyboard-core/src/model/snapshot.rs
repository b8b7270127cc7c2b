use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Document, Metric, StudySession};

/// Study hours logged against the weekly goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StudyGoal {
    pub target_hours: f64,
    pub logged_hours: f64,
}

/// Mean grade against the mean target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeMetric {
    pub average_score: f64,
    pub target: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoreMetric {
    pub done: usize,
    pub total: usize,
}

/// Immutable read of every tracked metric at one point in time.
///
/// `grades` and `chores` are `None` when nothing of that kind was recorded;
/// absent metrics are not evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub study: StudyGoal,
    pub grades: Option<GradeMetric>,
    pub chores: Option<ChoreMetric>,
    /// Length of the rolling window `study.logged_hours` was summed over
    pub study_window_days: u32,
}

impl Snapshot {
    pub fn new(study: StudyGoal) -> Self {
        Self {
            study,
            grades: None,
            chores: None,
            study_window_days: 7,
        }
    }

    pub fn with_grades(mut self, grades: GradeMetric) -> Self {
        self.grades = Some(grades);
        self
    }

    pub fn with_chores(mut self, chores: ChoreMetric) -> Self {
        self.chores = Some(chores);
        self
    }

    /// Derive a snapshot from `doc` as of `today`, summing study hours over
    /// the `window_days` days ending on `today`.
    pub fn from_document(doc: &Document, today: NaiveDate, window_days: u32) -> Self {
        let window_days = window_days.max(1);
        let study = StudyGoal {
            target_hours: doc.settings.goals.weekly_study_hours,
            logged_hours: recent_hours(&doc.study_sessions, today, window_days),
        };

        let grades = (!doc.grades.is_empty()).then(|| {
            let count = doc.grades.len() as f64;
            let goal = doc.settings.goals.grade_target;
            GradeMetric {
                average_score: doc.grades.iter().map(|g| g.score).sum::<f64>() / count,
                target: doc.grades.iter().map(|g| g.target_or(goal)).sum::<f64>() / count,
            }
        });

        let chores = (!doc.chores.is_empty()).then(|| ChoreMetric {
            done: doc.chores.iter().filter(|c| c.is_done()).count(),
            total: doc.chores.len(),
        });

        Self {
            study,
            grades,
            chores,
            study_window_days: window_days,
        }
    }

    /// `(metric, achieved, target)` for every metric present, in metric order.
    pub fn measurements(&self) -> Vec<(Metric, f64, f64)> {
        let mut out = vec![(
            Metric::StudyHours,
            self.study.logged_hours,
            self.study.target_hours,
        )];
        if let Some(g) = self.grades {
            out.push((Metric::GradeAverage, g.average_score, g.target));
        }
        if let Some(c) = self.chores {
            out.push((Metric::ChoreCompletion, c.done as f64, c.total as f64));
        }
        out
    }
}

/// Hours from sessions dated within `days` days ending on `today`, inclusive.
pub(crate) fn recent_hours(sessions: &[StudySession], today: NaiveDate, days: u32) -> f64 {
    let cutoff = today
        .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
        .unwrap_or(NaiveDate::MIN);
    sessions
        .iter()
        .filter(|s| s.date >= cutoff && s.date <= today)
        .map(|s| s.hours)
        .sum()
}
