use clap::Subcommand;

use super::Board;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Get a settings value
    Get {
        /// Settings key (e.g. "thresholds.study.warning", "goals.grade_target")
        key: String,
    },
    /// Set a settings value; invalid goals or thresholds are rejected
    Set {
        /// Settings key
        key: String,
        /// New value
        value: String,
    },
    /// List all goals and thresholds
    List,
    /// Reset goals and thresholds to defaults
    Reset,
}

pub fn run(board: &Board, action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SettingsAction::Get { key } => match board.setting(&key)? {
            Some(value) => println!("{value}"),
            None => return Err(format!("unknown key: {key}").into()),
        },
        SettingsAction::Set { key, value } => {
            board.set_setting(&key, &value)?;
            println!("ok");
        }
        SettingsAction::List => {
            let doc = board.document()?;
            println!("{}", serde_json::to_string_pretty(&doc.settings)?);
        }
        SettingsAction::Reset => {
            board.reset_settings()?;
            println!("settings reset to defaults");
        }
    }
    Ok(())
}
