//! Threshold evaluator.
//!
//! Turns a [`Snapshot`] into one [`NotificationLevel`] per tracked metric:
//!
//! - ratio `< critical` -> **Critical**
//! - `critical <= ratio < warning` -> **Warning**
//! - ratio `>= warning` -> **Ok**
//!
//! A ratio sitting exactly on a cutoff lands in the better band. The overall
//! level is the most severe of the per-metric levels.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::EvaluationError;
use crate::model::{Metric, NotificationLevel, Snapshot};
use crate::thresholds::{Cutoffs, ThresholdConfig};

/// Level assigned to a single metric, with the values it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricLevel {
    pub achieved: f64,
    pub target: f64,
    pub ratio: f64,
    pub level: NotificationLevel,
}

/// Result of evaluating one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub metrics: BTreeMap<Metric, MetricLevel>,
    pub overall: NotificationLevel,
}

impl Evaluation {
    pub fn level(&self, metric: Metric) -> Option<NotificationLevel> {
        self.metrics.get(&metric).map(|m| m.level)
    }

    pub fn ratio(&self, metric: Metric) -> Option<f64> {
        self.metrics.get(&metric).map(|m| m.ratio)
    }
}

/// Place `ratio` into a band.
pub fn classify(ratio: f64, cutoffs: Cutoffs) -> NotificationLevel {
    if ratio < cutoffs.critical() {
        NotificationLevel::Critical
    } else if ratio < cutoffs.warning() {
        NotificationLevel::Warning
    } else {
        NotificationLevel::Ok
    }
}

/// `achieved / target` for `metric`.
///
/// # Errors
///
/// - [`EvaluationError::DivisionUndefined`] if `target` is zero
/// - [`EvaluationError::InvalidConfiguration`] if either value is negative
///   or not finite
pub fn completion_ratio(metric: Metric, achieved: f64, target: f64) -> Result<f64, EvaluationError> {
    let invalid = |message: String| EvaluationError::InvalidConfiguration {
        metric: metric.name().to_string(),
        message,
    };

    if !target.is_finite() || target < 0.0 {
        return Err(invalid(format!("target {target} must be a non-negative number")));
    }
    if !achieved.is_finite() || achieved < 0.0 {
        return Err(invalid(format!("value {achieved} must be a non-negative number")));
    }
    if target == 0.0 {
        return Err(EvaluationError::DivisionUndefined {
            metric: metric.name().to_string(),
        });
    }
    Ok(achieved / target)
}

/// Most severe level in `levels`, or `Ok` when there are none.
pub fn overall_level<I>(levels: I) -> NotificationLevel
where
    I: IntoIterator<Item = NotificationLevel>,
{
    levels.into_iter().max().unwrap_or_default()
}

/// Evaluate every metric present in `snapshot`.
///
/// # Errors
///
/// Fails on the first metric whose ratio cannot be computed; see
/// [`completion_ratio`].
pub fn evaluate(snapshot: &Snapshot, thresholds: &ThresholdConfig) -> Result<Evaluation, EvaluationError> {
    let mut metrics = BTreeMap::new();
    for (metric, achieved, target) in snapshot.measurements() {
        let ratio = completion_ratio(metric, achieved, target)?;
        let level = classify(ratio, thresholds.cutoffs(metric));
        tracing::debug!(metric = metric.name(), ratio, level = level.as_str(), "metric evaluated");
        metrics.insert(
            metric,
            MetricLevel {
                achieved,
                target,
                ratio,
                level,
            },
        );
    }

    let overall = overall_level(metrics.values().map(|m| m.level));
    Ok(Evaluation { metrics, overall })
}
