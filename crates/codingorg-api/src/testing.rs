//! Shared fakes for handler and router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use codingorg_crew::{ExternalTaskRunner, RunnerError};
use codingorg_events::{ChannelConnection, ConnectionRegistry};
use tokio::sync::mpsc;

use crate::config::{ApiConfig, TaskMode};
use crate::state::AppState;

pub enum Outcome {
    Output(&'static str),
    /// Succeeds after sleeping.
    Delayed(Duration, &'static str),
    Fail(&'static str),
    Unconfigured,
}

pub struct FakeRunner {
    outcome: Outcome,
    executions: AtomicUsize,
}

impl FakeRunner {
    pub fn new(outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            executions: AtomicUsize::new(0),
        })
    }

    pub fn ok(output: &'static str) -> Arc<Self> {
        Self::new(Outcome::Output(output))
    }

    pub fn executions(&self) -> usize {
        self.executions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExternalTaskRunner for FakeRunner {
    fn name(&self) -> &str {
        "fake"
    }

    fn preflight(&self) -> codingorg_crew::Result<()> {
        match self.outcome {
            Outcome::Unconfigured => Err(RunnerError::MissingCredential("GOOGLE_API_KEY".into())),
            _ => Ok(()),
        }
    }

    async fn execute(&self, _instruction: &str) -> codingorg_crew::Result<String> {
        self.executions.fetch_add(1, Ordering::SeqCst);
        match self.outcome {
            Outcome::Output(out) => Ok(out.to_string()),
            Outcome::Delayed(delay, out) => {
                tokio::time::sleep(delay).await;
                Ok(out.to_string())
            }
            Outcome::Fail(detail) => Err(RunnerError::Framework(detail.to_string())),
            Outcome::Unconfigured => Err(RunnerError::Framework("not configured".into())),
        }
    }
}

pub fn make_test_state(runner: Arc<FakeRunner>) -> AppState {
    make_state_with_mode(runner, TaskMode::Background)
}

pub fn make_state_with_mode(runner: Arc<FakeRunner>, mode: TaskMode) -> AppState {
    AppState::new(
        ApiConfig::default().with_task_mode(mode),
        Arc::new(ConnectionRegistry::new()),
        runner,
    )
}

/// Registers a channel-backed connection and returns its receiving end.
pub async fn listen(state: &AppState) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    state
        .registry
        .register(Arc::new(ChannelConnection::new(tx)))
        .await
        .unwrap();
    rx
}
