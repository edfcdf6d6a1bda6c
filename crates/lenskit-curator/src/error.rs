//! Error types for curator jobs

use thiserror::Error;

/// Errors that can occur while running a maintenance job
#[derive(Error, Debug)]
pub enum CuratorError {
    /// Storage layer error
    #[error("Storage error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Existing-relationships file could not be read or parsed
    #[error("Connections file error: {0}")]
    Connections(String),

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
