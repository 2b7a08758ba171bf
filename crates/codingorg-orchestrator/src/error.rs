//! Error types for orchestration sessions.

use thiserror::Error;

/// Errors returned by [`OrchestrationSession::run`](crate::OrchestrationSession::run).
///
/// Only problems detected before any event is published end up here; runner
/// failures become a failing `TaskResult` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Bad input, rejected before any side effect.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl From<codingorg_models::ValidationError> for SessionError {
    fn from(err: codingorg_models::ValidationError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
