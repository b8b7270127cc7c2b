use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a tracked metric, ordered `Ok < Warning < Critical`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    #[default]
    Ok,
    Warning,
    Critical,
}

impl NotificationLevel {
    /// Numeric rank used when comparing severities (0 = ok).
    pub fn severity(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Critical => 2,
        }
    }

    /// Visual state the presentation layer renders for this level.
    pub fn display_state(self) -> &'static str {
        match self {
            Self::Ok => "success",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked metric the evaluator knows how to score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Hours studied in the window vs. the weekly goal
    StudyHours,
    /// Mean grade vs. mean target
    GradeAverage,
    /// Chores done vs. chores recorded
    ChoreCompletion,
}

impl Metric {
    pub const ALL: [Metric; 3] = [
        Metric::StudyHours,
        Metric::GradeAverage,
        Metric::ChoreCompletion,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::StudyHours => "study_hours",
            Self::GradeAverage => "grade_average",
            Self::ChoreCompletion => "chore_completion",
        }
    }

    /// Key of this metric's cutoffs under `settings.thresholds`.
    pub fn settings_key(self) -> &'static str {
        match self {
            Self::StudyHours => "study",
            Self::GradeAverage => "grades",
            Self::ChoreCompletion => "chores",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(NotificationLevel::Ok < NotificationLevel::Warning);
        assert!(NotificationLevel::Warning < NotificationLevel::Critical);
        assert_eq!(
            [
                NotificationLevel::Warning,
                NotificationLevel::Critical,
                NotificationLevel::Ok
            ]
            .into_iter()
            .max(),
            Some(NotificationLevel::Critical)
        );
    }

    #[test]
    fn display_state_maps_ok_to_success() {
        assert_eq!(NotificationLevel::Ok.display_state(), "success");
        assert_eq!(NotificationLevel::Warning.display_state(), "warning");
        assert_eq!(NotificationLevel::Critical.display_state(), "critical");
    }

    #[test]
    fn level_serializes_as_snake_case() {
        let json = serde_json::to_string(&NotificationLevel::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
        let json = serde_json::to_string(&Metric::ChoreCompletion).unwrap();
        assert_eq!(json, "\"chore_completion\"");
    }
}
