//! Error types for evaluar operations

use thiserror::Error;

/// Result alias for evaluar operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during a batch evaluation run
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset could not be loaded or is malformed
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Model failed to fit or predict
    #[error("Model error: {0}")]
    Model(String),

    /// Invalid configuration parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// I/O error (directory creation or file write)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization error
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),
}
