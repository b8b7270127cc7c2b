use chrono::NaiveDate;
use clap::Subcommand;

use super::{today, Board};

#[derive(Subcommand)]
pub enum StudyAction {
    /// Log study time
    Add {
        /// Hours studied
        #[arg(allow_negative_numbers = true)]
        hours: f64,
        /// Subject (default: General)
        #[arg(long, default_value = "")]
        subject: String,
        /// Day the session happened (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List logged sessions
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(board: &Board, action: StudyAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StudyAction::Add { hours, subject, date } => {
            let session = board.add_study_session(&subject, hours, date.unwrap_or_else(today))?;
            println!(
                "Logged {:.1} hrs of {} on {}",
                session.hours, session.subject, session.date
            );
        }
        StudyAction::List { json } => {
            let doc = board.document()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&doc.study_sessions)?);
            } else if doc.study_sessions.is_empty() {
                println!("No study sessions logged.");
            } else {
                for s in &doc.study_sessions {
                    println!("{}  {:>5.1} hrs  {}", s.date, s.hours, s.subject);
                }
            }
        }
    }
    Ok(())
}
