//! Core error types for studyboard-core.
//!
//! Every fallible operation in the library reports one of the enums below;
//! [`CoreError`] wraps them all for callers that do not care which layer
//! failed.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyboard-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Threshold or metric evaluation errors
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Document store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while validating thresholds or evaluating a snapshot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// Thresholds or metric values are malformed
    #[error("Invalid configuration for '{metric}': {message}")]
    InvalidConfiguration { metric: String, message: String },

    /// The metric's goal, target or total is zero
    #[error("Completion ratio for '{metric}' is undefined: denominator is zero")]
    DivisionUndefined { metric: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Document store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read the document
    #[error("Failed to read document at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document exists but does not parse
    #[error("Document at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write the document
    #[error("Failed to write document to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode the document
    #[error("Failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),

    /// The in-memory store lock was poisoned
    #[error("Document store lock poisoned")]
    Poisoned,
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
