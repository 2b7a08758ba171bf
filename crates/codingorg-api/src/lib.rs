//! HTTP and WebSocket gateway for codingorg.
//!
//! Routes:
//! - `GET /` - browser test page
//! - `GET /ws` - event stream; every client message is acknowledged
//! - `POST /start_task` - submit a prompt to the crew
//! - `GET /api/health` - liveness and connection count
//!
//! # Example
//!
//! ```ignore
//! use codingorg_api::{ApiConfig, AppState, serve};
//! use codingorg_crew::{Crew, RunnerConfig};
//! use codingorg_events::ConnectionRegistry;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::default();
//!     let runner = Arc::new(Crew::new(RunnerConfig::from_env()));
//!     let state = AppState::new(config.clone(), Arc::new(ConnectionRegistry::new()), runner);
//!
//!     serve(config, state).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod sessions;
pub mod state;
pub mod types;

pub use config::{ApiConfig, TaskMode};
pub use error::{ApiError, Result};
pub use router::{create_router, serve, serve_with_shutdown};
pub use sessions::SessionTracker;
pub use state::AppState;

#[cfg(test)]
mod testing;
