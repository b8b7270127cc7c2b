//! TOML-based application configuration.
//!
//! Stores settings that belong to the installation rather than to the
//! tracked data:
//! - Where the dashboard document lives
//! - The length of the rolling study-hours window
//! - The default log filter
//!
//! Configuration is stored at `~/.config/studyboard/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{data_dir, JsonFileStore};
use crate::dot_path::{display_value, get_json_value_by_path, set_json_value_by_path};
use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.toml";
const DOCUMENT_FILE: &str = "dashboard.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Document path; defaults to `dashboard.json` in the data directory.
    #[serde(default)]
    pub data_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_study_window_days")]
    pub study_window_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when RUST_LOG is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studyboard/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_study_window_days() -> u32 {
    7
}
fn default_log_filter() -> String {
    "warn".into()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            study_window_days: default_study_window_days(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join(CONFIG_FILE))
    }

    /// Load from the data directory, writing the defaults if the file is
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// # Errors
    ///
    /// See [`Config::save`].
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero-day study window or
    /// an empty log filter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dashboard.study_window_days == 0 {
            return Err(ConfigError::InvalidValue {
                key: "dashboard.study_window_days".to_string(),
                message: "window must be at least one day".to_string(),
            });
        }
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "logging.filter".to_string(),
                message: "filter must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        get_json_value_by_path(&json, key).map(display_value)
    }

    /// Update a value in memory, keeping the old config if the result is
    /// invalid.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// or fails validation.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a value by key and persist. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// See [`Config::apply`] and [`Config::save`].
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Where the dashboard document is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if no path is configured and the data directory
    /// cannot be created.
    pub fn data_file_path(&self) -> Result<PathBuf, ConfigError> {
        match self.storage.data_file.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
            _ => Ok(data_dir()?.join(DOCUMENT_FILE)),
        }
    }

    /// # Errors
    ///
    /// See [`Config::data_file_path`].
    pub fn document_store(&self) -> Result<JsonFileStore, ConfigError> {
        Ok(JsonFileStore::new(self.data_file_path()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.dashboard.study_window_days, 7);
        assert_eq!(parsed.logging.filter, "warn");
        assert!(parsed.storage.data_file.is_none());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("dashboard.study_window_days").as_deref(), Some("7"));
        assert_eq!(cfg.get("logging.filter").as_deref(), Some("warn"));
        assert!(cfg.get("dashboard.missing_key").is_none());
    }

    #[test]
    fn apply_updates_number() {
        let mut cfg = Config::default();
        cfg.apply("dashboard.study_window_days", "14").unwrap();
        assert_eq!(cfg.dashboard.study_window_days, 14);
    }

    #[test]
    fn apply_sets_optional_data_file() {
        let mut cfg = Config::default();
        cfg.apply("storage.data_file", "/tmp/board.json").unwrap();
        assert_eq!(cfg.data_file_path().unwrap(), PathBuf::from("/tmp/board.json"));
    }

    #[test]
    fn apply_rejects_zero_window_and_keeps_old_value() {
        let mut cfg = Config::default();
        assert!(cfg.apply("dashboard.study_window_days", "0").is_err());
        assert_eq!(cfg.dashboard.study_window_days, 7);
    }

    #[test]
    fn apply_rejects_fractional_window() {
        let mut cfg = Config::default();
        let err = cfg.apply("dashboard.study_window_days", "2.5").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.apply("ui.dark_mode", "true").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(_)));
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.dashboard.study_window_days, 7);
        assert!(path.exists());
    }

    #[test]
    fn load_from_reads_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[dashboard]\nstudy_window_days = 10\n").unwrap();
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.dashboard.study_window_days, 10);
        assert_eq!(cfg.logging.filter, "warn");
    }

    #[test]
    fn load_from_rejects_malformed_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "dashboard = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
