//! Human-readable messages for escalated metrics.

use serde::{Deserialize, Serialize};

use crate::evaluator::{Evaluation, MetricLevel};
use crate::model::{Metric, NotificationLevel, Snapshot};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    /// `None` for the "all on target" message
    pub metric: Option<Metric>,
    pub message: String,
}

/// One notification per metric at warning or critical, in metric order.
/// When nothing escalated, a single `Ok` notification is returned instead.
pub fn build_notifications(snapshot: &Snapshot, evaluation: &Evaluation) -> Vec<Notification> {
    let mut out: Vec<Notification> = evaluation
        .metrics
        .iter()
        .filter(|(_, m)| m.level != NotificationLevel::Ok)
        .map(|(&metric, m)| Notification {
            level: m.level,
            metric: Some(metric),
            message: message_for(metric, m, snapshot.study_window_days),
        })
        .collect();

    if out.is_empty() {
        out.push(Notification {
            level: NotificationLevel::Ok,
            metric: None,
            message: "All tracked metrics on target.".to_string(),
        });
    }
    out
}

fn message_for(metric: Metric, m: &MetricLevel, window_days: u32) -> String {
    let critical = m.level == NotificationLevel::Critical;
    match metric {
        Metric::StudyHours => {
            let lead = if critical {
                "Study time well below goal"
            } else {
                "Study time below goal"
            };
            format!(
                "{lead}: {:.1} / {} hrs in the last {window_days} days.",
                m.achieved, m.target
            )
        }
        Metric::GradeAverage if critical => format!(
            "Grades slipping: average {:.1} is far below the target of {:.0}.",
            m.achieved, m.target
        ),
        Metric::GradeAverage => format!(
            "Average grade {:.1} is below the target of {:.0}.",
            m.achieved, m.target
        ),
        Metric::ChoreCompletion => {
            let pending = m.target - m.achieved;
            if critical {
                format!("{pending} of {} chores pending; deal with them now.", m.target)
            } else {
                format!("{pending} of {} chores still pending.", m.target)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::evaluate;
    use crate::model::{ChoreMetric, GradeMetric, StudyGoal};
    use crate::thresholds::ThresholdConfig;

    fn snapshot(logged: f64) -> Snapshot {
        Snapshot::new(StudyGoal {
            target_hours: 10.0,
            logged_hours: logged,
        })
    }

    #[test]
    fn on_target_yields_single_ok_message() {
        let snap = snapshot(12.0);
        let eval = evaluate(&snap, &ThresholdConfig::default()).unwrap();
        let notes = build_notifications(&snap, &eval);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotificationLevel::Ok);
        assert_eq!(notes[0].metric, None);
    }

    #[test]
    fn escalated_metrics_each_get_a_message() {
        let snap = snapshot(4.0)
            .with_grades(GradeMetric {
                average_score: 80.0,
                target: 85.0,
            })
            .with_chores(ChoreMetric { done: 5, total: 5 });
        let eval = evaluate(&snap, &ThresholdConfig::default()).unwrap();
        let notes = build_notifications(&snap, &eval);

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].metric, Some(Metric::StudyHours));
        assert_eq!(notes[0].level, NotificationLevel::Critical);
        assert_eq!(
            notes[0].message,
            "Study time well below goal: 4.0 / 10 hrs in the last 7 days."
        );
        assert_eq!(notes[1].metric, Some(Metric::GradeAverage));
        assert_eq!(notes[1].level, NotificationLevel::Warning);
        assert!(notes[1].message.contains("80.0"));
    }

    #[test]
    fn every_escalated_metric_is_reported() {
        let snap = snapshot(2.0)
            .with_grades(GradeMetric {
                average_score: 40.0,
                target: 85.0,
            })
            .with_chores(ChoreMetric { done: 3, total: 5 });
        let eval = evaluate(&snap, &ThresholdConfig::default()).unwrap();
        let escalated = eval
            .metrics
            .values()
            .filter(|m| m.level != NotificationLevel::Ok)
            .count();
        let notes = build_notifications(&snap, &eval);

        assert_eq!(escalated, 3);
        assert_eq!(notes.len(), 3);
        assert_eq!(
            notes.iter().map(|n| n.metric).collect::<Vec<_>>(),
            vec![
                Some(Metric::StudyHours),
                Some(Metric::GradeAverage),
                Some(Metric::ChoreCompletion)
            ]
        );
        assert_eq!(notes[2].message, "2 of 5 chores still pending.");
    }

    #[test]
    fn chore_message_reports_pending_count() {
        let snap = snapshot(10.0).with_chores(ChoreMetric { done: 1, total: 4 });
        let eval = evaluate(&snap, &ThresholdConfig::default()).unwrap();
        let notes = build_notifications(&snap, &eval);
        assert_eq!(notes[0].message, "3 of 4 chores pending; deal with them now.");
    }
}
