pub mod chore;
pub mod config;
pub mod grade;
pub mod settings;
pub mod status;
pub mod study;

use chrono::NaiveDate;
use studyboard_core::{Config, ConfigError, Dashboard, JsonFileStore};

pub type Board = Dashboard<JsonFileStore>;

pub fn open_dashboard(config: &Config) -> Result<Board, ConfigError> {
    Ok(Dashboard::new(config.document_store()?)
        .with_study_window(config.dashboard.study_window_days))
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
