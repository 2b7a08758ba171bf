//! Tracking for sessions running in the background.
//!
//! Background sessions outlive the request that started them. The server
//! drains this tracker after it stops accepting connections so that a
//! shutdown never drops a session halfway through its runner.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::warn;

/// Handles of background sessions, shared by every clone of the state.
#[derive(Clone, Default)]
pub struct SessionTracker {
    tasks: Arc<Mutex<JoinSet<()>>>,
}

impl SessionTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a tracked task.
    pub async fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut tasks = self.tasks.lock().await;
        // Reap finished sessions so the set only holds running ones.
        while let Some(result) = tasks.try_join_next() {
            log_join_error(result);
        }
        tasks.spawn(future);
    }

    /// Number of tracked tasks not yet reaped.
    pub async fn len(&self) -> usize {
        self.tasks.lock().await.len()
    }

    /// Whether no tracked tasks remain.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Waits for every tracked task to finish.
    pub async fn drain(&self) {
        let mut tasks = self.tasks.lock().await;
        while let Some(result) = tasks.join_next().await {
            log_join_error(result);
        }
    }
}

fn log_join_error(result: Result<(), tokio::task::JoinError>) {
    if let Err(e) = result {
        warn!(error = %e, "background session panicked");
    }
}

impl std::fmt::Debug for SessionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTracker").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_new_tracker_is_empty() {
        let tracker = SessionTracker::new();
        assert!(tracker.is_empty().await);
        tracker.drain().await;
    }

    #[tokio::test]
    async fn test_drain_waits_for_running_tasks() {
        let tracker = SessionTracker::new();
        let finished = Arc::new(AtomicUsize::new(0));

        for delay in [50, 100] {
            let finished = Arc::clone(&finished);
            tracker
                .spawn(async move {
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    finished.fetch_add(1, Ordering::SeqCst);
                })
                .await;
        }
        assert_eq!(tracker.len().await, 2);

        tokio::time::timeout(Duration::from_secs(5), tracker.drain())
            .await
            .expect("drain timed out");

        assert_eq!(finished.load(Ordering::SeqCst), 2);
        assert!(tracker.is_empty().await);
    }

    #[tokio::test]
    async fn test_finished_tasks_are_reaped_on_spawn() {
        let tracker = SessionTracker::new();
        tracker.spawn(async {}).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        tracker
            .spawn(tokio::time::sleep(Duration::from_secs(60)))
            .await;

        assert_eq!(tracker.len().await, 1);
    }

    #[tokio::test]
    async fn test_panicking_task_does_not_stop_drain() {
        let tracker = SessionTracker::new();
        let finished = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&finished);

        tracker.spawn(async { panic!("runner blew up") }).await;
        tracker
            .spawn(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        tracker.drain().await;
        assert_eq!(finished.load(Ordering::SeqCst), 1);
    }
}
