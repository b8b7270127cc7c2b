use clap::Subcommand;
use studyboard_core::ChoreStatus;

use super::Board;

#[derive(Subcommand)]
pub enum ChoreAction {
    /// Add a pending chore
    Add {
        /// What needs doing
        label: String,
    },
    /// Flip a chore between pending and done
    Toggle {
        /// Chore index as shown by `chore list`
        index: usize,
    },
    /// List chores
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn mark(status: ChoreStatus) -> &'static str {
    match status {
        ChoreStatus::Pending => "[ ]",
        ChoreStatus::Done => "[x]",
    }
}

pub fn run(board: &Board, action: ChoreAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ChoreAction::Add { label } => {
            let chore = board.add_chore(&label)?;
            println!("Added chore: {}", chore.label);
        }
        ChoreAction::Toggle { index } => {
            let chore = board.toggle_chore(index)?;
            println!("{} {}", mark(chore.status), chore.label);
        }
        ChoreAction::List { json } => {
            let doc = board.document()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&doc.chores)?);
            } else if doc.chores.is_empty() {
                println!("No chores recorded.");
            } else {
                for (i, c) in doc.chores.iter().enumerate() {
                    println!("{i:>3} {} {}", mark(c.status), c.label);
                }
            }
        }
    }
    Ok(())
}
