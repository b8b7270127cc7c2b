use clap::Subcommand;

use super::Board;

#[derive(Subcommand)]
pub enum GradeAction {
    /// Record a grade (score is clamped to 0-100)
    Add {
        /// Score received
        #[arg(allow_negative_numbers = true)]
        score: f64,
        /// Subject (default: Course)
        #[arg(long, default_value = "")]
        subject: String,
        /// Target score (default: goals.grade_target)
        #[arg(long)]
        target: Option<f64>,
    },
    /// List recorded grades
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(board: &Board, action: GradeAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        GradeAction::Add { score, subject, target } => {
            let grade = board.add_grade(&subject, score, target)?;
            let target = grade
                .target
                .map(|t| format!(" (target {t:.1})"))
                .unwrap_or_default();
            println!("Recorded {}: {:.1}{target}", grade.subject, grade.score);
        }
        GradeAction::List { json } => {
            let doc = board.document()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&doc.grades)?);
            } else if doc.grades.is_empty() {
                println!("No grades recorded.");
            } else {
                let goal = doc.settings.goals.grade_target;
                for g in &doc.grades {
                    println!("{:>5.1} / {:>5.1}  {}", g.score, g.target_or(goal), g.subject);
                }
            }
        }
    }
    Ok(())
}
