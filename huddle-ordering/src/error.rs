//! Error types for the ordering engine

use std::path::PathBuf;
use thiserror::Error;

/// Result type for ordering operations
pub type Result<T> = std::result::Result<T, OrderingError>;

/// Errors that can occur in ordering operations
#[derive(Debug, Error)]
pub enum OrderingError {
    /// Board not initialized at the given path
    #[error("board not initialized at {path}")]
    NotInitialized { path: PathBuf },

    /// Board already exists
    #[error("board already exists at {path}")]
    AlreadyExists { path: PathBuf },

    /// Task not found
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// Column not found
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Batch reorder references a task outside its column
    #[error("task '{task}' is not in column '{column}'")]
    TaskNotInColumn { task: String, column: String },

    /// Batch reorder with no entries
    #[error("batch reorder requires at least one entry")]
    EmptyBatch,

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Lock is held by another writer
    #[error("board lock busy - another operation in progress")]
    LockBusy,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OrderingError {
    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if this is a retryable error
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LockBusy)
    }
}
