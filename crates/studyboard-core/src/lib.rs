//! # studyboard Core Library
//!
//! Core logic for a personal study/grades/chores dashboard. The CLI binary is
//! a thin presentation layer over this crate.
//!
//! ## Architecture
//!
//! - **Evaluator**: a pure function from a [`Snapshot`] and a validated
//!   [`ThresholdConfig`] to one [`NotificationLevel`] per metric plus an
//!   overall level
//! - **Model**: the persisted [`Document`] and the snapshot derived from it
//! - **Storage**: the [`DocumentStore`] trait with JSON-file and in-memory
//!   implementations, and TOML-based [`Config`]
//! - **Dashboard**: load / mutate / save operations used by the CLI
//!
//! ## Key Components
//!
//! - [`evaluate`]: threshold-escalation rule
//! - [`Dashboard`]: request-scoped operations over a store
//! - [`Config`]: application configuration management

pub mod dashboard;
mod dot_path;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod notifications;
pub mod storage;
pub mod thresholds;

pub use dashboard::{Dashboard, StatusReport};
pub use error::{ConfigError, CoreError, EvaluationError, StoreError, ValidationError};
pub use evaluator::{classify, completion_ratio, evaluate, overall_level, Evaluation, MetricLevel};
pub use model::{
    Chore, ChoreMetric, ChoreStatus, Document, GradeEntry, GradeMetric, Goals, Metric,
    NotificationLevel, Settings, Snapshot, StudyGoal, StudySession,
};
pub use notifications::{build_notifications, Notification};
pub use storage::{Config, DocumentStore, JsonFileStore, MemoryStore};
pub use thresholds::{CutoffSettings, Cutoffs, ThresholdConfig, ThresholdSettings};
