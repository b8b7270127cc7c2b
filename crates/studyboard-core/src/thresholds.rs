//! Warning/critical cutoffs per metric.
//!
//! Thresholds are stored with the document as plain [`ThresholdSettings`]
//! and only become a [`ThresholdConfig`] after validation, so the evaluator
//! never sees inverted or out-of-range cutoffs.

use serde::{Deserialize, Serialize};

use crate::error::EvaluationError;
use crate::model::Metric;

/// Stored (unvalidated) cutoff pair for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutoffSettings {
    /// Ratio below which the metric is at least a warning
    pub warning: f64,
    /// Ratio below which the metric is critical
    pub critical: f64,
}

/// Stored thresholds for every metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSettings {
    #[serde(default = "default_study")]
    pub study: CutoffSettings,
    #[serde(default = "default_grades")]
    pub grades: CutoffSettings,
    #[serde(default = "default_chores")]
    pub chores: CutoffSettings,
}

fn default_study() -> CutoffSettings {
    CutoffSettings {
        warning: 1.0,
        critical: 0.5,
    }
}
fn default_grades() -> CutoffSettings {
    CutoffSettings {
        warning: 1.0,
        critical: 0.85,
    }
}
fn default_chores() -> CutoffSettings {
    CutoffSettings {
        warning: 0.8,
        critical: 0.5,
    }
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            study: default_study(),
            grades: default_grades(),
            chores: default_chores(),
        }
    }
}

impl ThresholdSettings {
    pub fn for_metric(&self, metric: Metric) -> CutoffSettings {
        match metric {
            Metric::StudyHours => self.study,
            Metric::GradeAverage => self.grades,
            Metric::ChoreCompletion => self.chores,
        }
    }

    /// Validate every metric's cutoffs.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::InvalidConfiguration`] naming the first
    /// metric whose cutoffs are out of `[0, 1]`, non-finite, or inverted.
    pub fn validate(&self) -> Result<ThresholdConfig, EvaluationError> {
        ThresholdConfig::try_from(self)
    }
}

/// A validated cutoff pair: `0 <= critical < warning <= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cutoffs {
    warning: f64,
    critical: f64,
}

impl Cutoffs {
    /// # Errors
    ///
    /// Returns [`EvaluationError::InvalidConfiguration`] when the pair is
    /// out of range or `critical >= warning`.
    pub fn new(warning: f64, critical: f64) -> Result<Self, EvaluationError> {
        Self::checked("cutoffs", warning, critical)
    }

    fn checked(label: &str, warning: f64, critical: f64) -> Result<Self, EvaluationError> {
        let invalid = |message: String| EvaluationError::InvalidConfiguration {
            metric: label.to_string(),
            message,
        };

        for (name, value) in [("warning", warning), ("critical", critical)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(invalid(format!(
                    "{name} cutoff {value} must be a ratio between 0 and 1"
                )));
            }
        }
        if critical >= warning {
            return Err(invalid(format!(
                "critical cutoff {critical} must be below warning cutoff {warning}"
            )));
        }

        Ok(Self { warning, critical })
    }

    pub fn warning(&self) -> f64 {
        self.warning
    }

    pub fn critical(&self) -> f64 {
        self.critical
    }
}

/// Validated thresholds for every metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdConfig {
    study: Cutoffs,
    grades: Cutoffs,
    chores: Cutoffs,
}

impl ThresholdConfig {
    pub fn new(study: Cutoffs, grades: Cutoffs, chores: Cutoffs) -> Self {
        Self {
            study,
            grades,
            chores,
        }
    }

    /// Same cutoffs for every metric.
    pub fn uniform(cutoffs: Cutoffs) -> Self {
        Self::new(cutoffs, cutoffs, cutoffs)
    }

    pub fn cutoffs(&self, metric: Metric) -> Cutoffs {
        match metric {
            Metric::StudyHours => self.study,
            Metric::GradeAverage => self.grades,
            Metric::ChoreCompletion => self.chores,
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        // The default settings are always in range.
        let settings = ThresholdSettings::default();
        let pick = |s: CutoffSettings| Cutoffs {
            warning: s.warning,
            critical: s.critical,
        };
        Self::new(
            pick(settings.study),
            pick(settings.grades),
            pick(settings.chores),
        )
    }
}

impl TryFrom<&ThresholdSettings> for ThresholdConfig {
    type Error = EvaluationError;

    fn try_from(settings: &ThresholdSettings) -> Result<Self, Self::Error> {
        let check = |metric: Metric| {
            let s = settings.for_metric(metric);
            Cutoffs::checked(metric.name(), s.warning, s.critical)
        };
        Ok(Self::new(
            check(Metric::StudyHours)?,
            check(Metric::GradeAverage)?,
            check(Metric::ChoreCompletion)?,
        ))
    }
}
