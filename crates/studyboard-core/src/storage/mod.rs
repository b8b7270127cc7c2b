mod config;
mod json_store;

pub use config::{Config, DashboardConfig, LoggingConfig, StorageConfig};
pub use json_store::JsonFileStore;

use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{ConfigError, StoreError};
use crate::model::Document;

/// Persists and retrieves the whole tracked [`Document`].
pub trait DocumentStore {
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    fn load(&self) -> Result<Document, StoreError>;

    /// Loads the document ahead of a mutation. Unlike [`load`](Self::load),
    /// a store must fail here instead of substituting a default for data it
    /// could not decode, so the save that follows cannot overwrite it.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read or decoded.
    fn load_for_update(&self) -> Result<Document, StoreError> {
        self.load()
    }

    /// # Errors
    /// Returns an error if the document cannot be encoded or written.
    fn save(&self, doc: &Document) -> Result<(), StoreError>;
}

/// Keeps the document in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    doc: Mutex<Document>,
}

impl MemoryStore {
    pub fn new(doc: Document) -> Self {
        Self {
            doc: Mutex::new(doc),
        }
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Result<Document, StoreError> {
        self.doc
            .lock()
            .map(|d| d.clone())
            .map_err(|_| StoreError::Poisoned)
    }

    fn save(&self, doc: &Document) -> Result<(), StoreError> {
        let mut guard = self.doc.lock().map_err(|_| StoreError::Poisoned)?;
        *guard = doc.clone();
        Ok(())
    }
}

/// Returns `~/.config/studyboard[-dev]/` based on STUDYBOARD_ENV.
///
/// Set STUDYBOARD_ENV=dev to use the development data directory, or
/// STUDYBOARD_HOME to use an explicit directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("STUDYBOARD_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("STUDYBOARD_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("studyboard-dev")
            } else {
                base_dir.join("studyboard")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
