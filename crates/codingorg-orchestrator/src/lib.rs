//! Orchestration layer for codingorg.
//!
//! An [`OrchestrationSession`] runs exactly one [`TaskRequest`] through an
//! [`ExternalTaskRunner`] and publishes what happens through a shared
//! [`ConnectionRegistry`]:
//!
//! | Outcome              | Events                         | Returned                     |
//! |----------------------|--------------------------------|------------------------------|
//! | empty prompt         | none                           | `Err(InvalidRequest)`        |
//! | preflight fails      | `error`                        | `Failure { configuration }`  |
//! | runner succeeds      | `status`, `final_result`       | `Success { output }`         |
//! | runner fails         | `status`, `error`              | `Failure { execution }`      |
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use codingorg_crew::{Crew, RunnerConfig};
//! use codingorg_events::ConnectionRegistry;
//! use codingorg_models::TaskRequest;
//! use codingorg_orchestrator::OrchestrationSession;
//!
//! # async fn example() -> codingorg_orchestrator::Result<()> {
//! let registry = Arc::new(ConnectionRegistry::new());
//! let runner = Arc::new(Crew::new(RunnerConfig::from_env()));
//!
//! let mut session = OrchestrationSession::new(registry, runner);
//! let result = session.run(TaskRequest::new("Create hello.py")).await?;
//! println!("{}", result.message());
//! # Ok(())
//! # }
//! ```

mod error;
mod session;

pub use error::{Result, SessionError};
pub use session::{OrchestrationSession, SessionState};

pub use codingorg_crew::ExternalTaskRunner;
pub use codingorg_events::ConnectionRegistry;
pub use codingorg_models::{TaskRequest, TaskResult};
