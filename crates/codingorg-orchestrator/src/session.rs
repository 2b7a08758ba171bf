//! One task, start to finish.

use std::sync::Arc;

use codingorg_crew::ExternalTaskRunner;
use codingorg_events::ConnectionRegistry;
use codingorg_models::{Event, FailureKind, SessionId, TaskRequest, TaskResult};
use tracing::{debug, info, warn};

use crate::error::{Result, SessionError};

/// Lifecycle of a session. `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Constructed, not yet run.
    Created,
    /// Waiting on the runner.
    Running,
    /// The runner returned a result.
    Completed,
    /// Preconditions or the runner failed.
    Failed,
}

impl SessionState {
    /// Whether the session has finished.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Runs one [`TaskRequest`] and publishes its events to every connection.
pub struct OrchestrationSession {
    id: SessionId,
    registry: Arc<ConnectionRegistry>,
    runner: Arc<dyn ExternalTaskRunner>,
    state: SessionState,
    used: bool,
}

impl OrchestrationSession {
    /// Creates a session with a fresh id.
    pub fn new(registry: Arc<ConnectionRegistry>, runner: Arc<dyn ExternalTaskRunner>) -> Self {
        Self::with_id(SessionId::new(), registry, runner)
    }

    /// Creates a session with the given id.
    pub fn with_id(
        id: SessionId,
        registry: Arc<ConnectionRegistry>,
        runner: Arc<dyn ExternalTaskRunner>,
    ) -> Self {
        Self {
            id,
            registry,
            runner,
            state: SessionState::Created,
            used: false,
        }
    }

    /// Session id carried by every event this session emits.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Runs the request to a terminal result.
    ///
    /// Returns `Err` only for requests rejected before anything is published.
    /// Every other outcome, including runner failures, is an `Ok` holding the
    /// `TaskResult` that was also published as the session's last event.
    pub async fn run(&mut self, request: TaskRequest) -> Result<TaskResult> {
        if self.used {
            return Err(SessionError::InvalidRequest("session already used".into()));
        }
        request.validate()?;
        self.used = true;

        info!(
            session_id = %self.id,
            runner = self.runner.name(),
            prompt_len = request.prompt.len(),
            "session started"
        );

        if let Err(e) = self.runner.preflight() {
            warn!(session_id = %self.id, error = %e, "session preconditions not met");
            let result = TaskResult::failure(FailureKind::Configuration, e.to_string());
            return Ok(self.fail(result).await);
        }

        self.state = SessionState::Running;
        self.publish(Event::status(&self.id, "Task started")).await;

        match self.runner.execute(&request.prompt).await {
            Ok(output) => {
                let result = TaskResult::success(output);
                self.publish(Event::final_result(&self.id, &result)).await;
                self.state = SessionState::Completed;
                info!(session_id = %self.id, "session completed");
                Ok(result)
            }
            Err(e) => {
                warn!(
                    session_id = %self.id,
                    error = %e,
                    configuration = e.is_configuration(),
                    "runner failed"
                );
                let result = TaskResult::failure(
                    FailureKind::Execution,
                    format!("An error occurred during crew execution: {}", e),
                );
                Ok(self.fail(result).await)
            }
        }
    }

    async fn fail(&mut self, result: TaskResult) -> TaskResult {
        self.publish(Event::error(&self.id, result.message())).await;
        self.state = SessionState::Failed;
        info!(session_id = %self.id, "session failed");
        result
    }

    async fn publish(&self, event: Event) {
        let report = self.registry.broadcast(&event).await;
        debug!(
            session_id = %self.id,
            kind = %event.kind,
            delivered = report.delivered_count(),
            failed = report.failure_count(),
            "event published"
        );
    }
}
