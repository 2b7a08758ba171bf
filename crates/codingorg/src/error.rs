//! Error types for the server binary.

use thiserror::Error;

/// Errors that stop the process.
#[derive(Debug, Error)]
pub enum AppError {
    /// The environment file exists but could not be read.
    #[error("failed to load environment file: {0}")]
    EnvFile(#[from] dotenvy::Error),

    /// The server could not bind or failed while running.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Result type for process-level operations.
pub type Result<T> = std::result::Result<T, AppError>;
