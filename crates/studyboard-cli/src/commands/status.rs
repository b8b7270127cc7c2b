use chrono::NaiveDate;
use studyboard_core::{Metric, MetricLevel, StatusReport};

use super::{today, Board};

pub fn run(board: &Board, date: Option<NaiveDate>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let report = board.status(date.unwrap_or_else(today))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render(&report));
    }
    Ok(())
}

fn detail(report: &StatusReport, metric: Metric, m: &MetricLevel) -> String {
    match metric {
        Metric::StudyHours => format!(
            "{:.1} / {} hrs (last {} days)",
            m.achieved, m.target, report.snapshot.study_window_days
        ),
        Metric::GradeAverage => format!("avg {:.1} / target {:.1}", m.achieved, m.target),
        Metric::ChoreCompletion => format!("{} / {} done", m.achieved, m.target),
    }
}

fn render(report: &StatusReport) -> String {
    let mut out = format!(
        "Status as of {}: {}\n\n",
        report.as_of,
        report.evaluation.overall.as_str().to_uppercase()
    );
    for (&metric, m) in &report.evaluation.metrics {
        out.push_str(&format!(
            "  {:<18} {:<32} {:>5.0}%  {}\n",
            metric.name(),
            detail(report, metric, m),
            m.ratio * 100.0,
            m.level
        ));
    }
    out.push_str("\nNotifications:\n");
    for n in &report.notifications {
        out.push_str(&format!("  [{}] {}\n", n.level.display_state(), n.message));
    }
    out
}
