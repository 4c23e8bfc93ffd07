//! Application-level errors for the CLI and server startup.

use bacspark_core::SparkError;
use thiserror::Error;

/// Errors surfaced by CLI commands and server startup.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] SparkError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}
