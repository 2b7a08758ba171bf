//! Error types for task runners.

use thiserror::Error;

/// Errors raised by an external task runner.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// A required credential is absent.
    #[error("{0} not found. Cannot run crew.")]
    MissingCredential(String),

    /// The external binary is not installed or not on PATH.
    #[error("'{0}' command not found")]
    BinaryNotFound(String),

    /// The external tool exited unsuccessfully.
    #[error("{tool} execution failed ({status}). Stderr: {stderr}")]
    ToolFailed {
        /// Tool name.
        tool: String,
        /// Exit status as reported by the OS.
        status: String,
        /// Captured standard error.
        stderr: String,
    },

    /// The language model request failed.
    #[error("model request failed: {0}")]
    Model(String),

    /// I/O error while driving the external process.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other failure inside the crew.
    #[error("crew failed: {0}")]
    Framework(String),
}

impl RunnerError {
    /// True for errors caused by missing configuration rather than by running.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingCredential(_) | Self::BinaryNotFound(_))
    }
}

/// Result type for runner operations.
pub type Result<T> = std::result::Result<T, RunnerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RunnerError::MissingCredential("GOOGLE_API_KEY".into());
        assert_eq!(err.to_string(), "GOOGLE_API_KEY not found. Cannot run crew.");

        let err = RunnerError::ToolFailed {
            tool: "aider".into(),
            status: "exit status: 2".into(),
            stderr: "bad flag".into(),
        };
        assert_eq!(
            err.to_string(),
            "aider execution failed (exit status: 2). Stderr: bad flag"
        );
    }

    #[test]
    fn test_is_configuration() {
        assert!(RunnerError::MissingCredential("X".into()).is_configuration());
        assert!(RunnerError::BinaryNotFound("aider".into()).is_configuration());
        assert!(!RunnerError::Model("timeout".into()).is_configuration());
        assert!(!RunnerError::Framework("boom".into()).is_configuration());
    }
}
