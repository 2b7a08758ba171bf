//! Application state shared across handlers.

use std::sync::Arc;

use codingorg_crew::ExternalTaskRunner;
use codingorg_events::ConnectionRegistry;
use codingorg_orchestrator::OrchestrationSession;

use crate::config::ApiConfig;
use crate::sessions::SessionTracker;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// Live client connections.
    pub registry: Arc<ConnectionRegistry>,
    /// Runner every session submits its task to.
    pub runner: Arc<dyn ExternalTaskRunner>,
    /// Sessions still running in the background.
    pub sessions: SessionTracker,
}

impl AppState {
    /// Creates a new AppState with all components.
    pub fn new(
        config: ApiConfig,
        registry: Arc<ConnectionRegistry>,
        runner: Arc<dyn ExternalTaskRunner>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            registry,
            runner,
            sessions: SessionTracker::new(),
        }
    }

    /// Creates a session bound to the shared registry and runner.
    pub fn new_session(&self) -> OrchestrationSession {
        OrchestrationSession::new(Arc::clone(&self.registry), Arc::clone(&self.runner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{make_test_state, FakeRunner};
    use codingorg_orchestrator::SessionState;

    #[test]
    fn test_sessions_are_distinct() {
        let state = make_test_state(FakeRunner::ok("done"));
        let a = state.new_session();
        let b = state.new_session();

        assert_ne!(a.id(), b.id());
        assert_eq!(a.state(), SessionState::Created);
    }

    #[test]
    fn test_state_clones_share_registry() {
        let state = make_test_state(FakeRunner::ok("done"));
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.registry, &clone.registry));
    }

    #[tokio::test]
    async fn test_state_clones_share_sessions() {
        let state = make_test_state(FakeRunner::ok("done"));
        let clone = state.clone();

        clone
            .sessions
            .spawn(tokio::time::sleep(std::time::Duration::from_secs(60)))
            .await;

        assert_eq!(state.sessions.len().await, 1);
    }
}
