//! Pretty-printed JSON file holding the whole document.
//!
//! A missing file is created with the default document. A file that no
//! longer parses is left untouched: reads serve the default document,
//! updates fail with [`StoreError::Corrupt`].

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::DocumentStore;
use crate::error::StoreError;
use crate::model::Document;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl JsonFileStore {
    /// Reads the document, creating it when missing and failing on a
    /// file that does not parse.
    fn read_document(&self) -> Result<Document, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let doc = serde_json::from_str::<Document>(&content).map_err(|source| {
                    StoreError::Corrupt {
                        path: self.path.clone(),
                        source,
                    }
                })?;
                tracing::debug!(path = %self.path.display(), "document loaded");
                Ok(doc)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "creating new document");
                let doc = Document::default();
                self.save(&doc)?;
                Ok(doc)
            }
            Err(source) => Err(StoreError::ReadFailed {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> Result<Document, StoreError> {
        match self.read_document() {
            Err(StoreError::Corrupt { path, source }) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %source,
                    "document is not valid JSON; using an empty document"
                );
                Ok(Document::default())
            }
            other => other,
        }
    }

    fn load_for_update(&self) -> Result<Document, StoreError> {
        self.read_document()
    }

    fn save(&self, doc: &Document) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(doc)?;
        let write_failed = |source: std::io::Error| StoreError::WriteFailed {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_failed)?;
        }
        std::fs::write(&self.path, content).map_err(write_failed)?;
        tracing::debug!(path = %self.path.display(), "document saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Chore, GradeEntry};
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dashboard.json");
        let store = JsonFileStore::new(&path);

        let doc = store.load().unwrap();
        assert_eq!(doc, Document::default());
        assert!(path.exists());
    }

    #[test]
    fn saved_document_is_loaded_back() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("dashboard.json"));

        let mut doc = Document::default();
        doc.chores.push(Chore::new("Dishes"));
        doc.grades.push(GradeEntry::new("Math", 91.0, 85.0).unwrap());
        store.save(&doc).unwrap();

        assert_eq!(store.load().unwrap(), doc);
    }

    #[test]
    fn corrupt_file_yields_default_without_overwriting() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dashboard.json");
        std::fs::write(&path, "{ not json").unwrap();

        let doc = JsonFileStore::new(&path).load().unwrap();
        assert_eq!(doc, Document::default());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn corrupt_file_refuses_update_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dashboard.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = JsonFileStore::new(&path).load_for_update();
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn directory_path_is_a_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = JsonFileStore::new(temp_dir.path()).load();
        assert!(matches!(result, Err(StoreError::ReadFailed { .. })));
    }
}
