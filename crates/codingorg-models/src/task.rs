//! Task requests and results.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a task request is rejected before any work starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The prompt is empty or whitespace only.
    #[error("prompt must not be empty")]
    EmptyPrompt,
}

/// An instruction submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRequest {
    /// What the crew should build.
    pub prompt: String,
}

impl TaskRequest {
    /// Creates a new request.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    /// Checks the request is acceptable.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.prompt.trim().is_empty() {
            return Err(ValidationError::EmptyPrompt);
        }
        Ok(())
    }
}

/// Category of a failed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Credentials or configuration required by the runner are missing.
    Configuration,
    /// The runner was invoked and failed.
    Execution,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration => write!(f, "configuration error"),
            Self::Execution => write!(f, "execution error"),
        }
    }
}

/// Terminal outcome of one orchestration session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TaskResult {
    /// The runner completed and produced output.
    Success {
        /// Runner output.
        output: String,
    },
    /// The task could not be completed.
    Failure {
        /// Failure category.
        kind: FailureKind,
        /// Description including the underlying detail.
        message: String,
    },
}

impl TaskResult {
    /// Creates a successful result.
    pub fn success(output: impl Into<String>) -> Self {
        Self::Success {
            output: output.into(),
        }
    }

    /// Creates a failed result.
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
        }
    }

    /// Returns true if the task succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Output on success, failure description otherwise.
    pub fn message(&self) -> &str {
        match self {
            Self::Success { output } => output,
            Self::Failure { message, .. } => message,
        }
    }

    /// Failure category, if the task failed.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }
}
