//! Task runner interface and the development crew.
//!
//! The orchestration layer only sees [`ExternalTaskRunner`]. This crate also
//! ships the runner used in production, a two-agent [`Crew`]:
//! - a Development Manager that plans and reviews through a [`ChatModel`]
//! - a Senior Software Engineer that implements through a [`CodingTool`]
//!
//! Agents and tasks are declarative data; the crew runs the tasks of a
//! [`CrewPlan`] one after another, feeding each task the outputs it depends on.
//!
//! # Example
//!
//! ```ignore
//! use codingorg_crew::{Crew, ExternalTaskRunner, RunnerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let crew = Crew::new(RunnerConfig::from_env().with_project_root("."));
//!     crew.preflight()?;
//!     let report = crew.execute("Create hello.py that prints 'Hello'").await?;
//!     println!("{}", report);
//!     Ok(())
//! }
//! ```

pub mod agents;
pub mod aider;
pub mod config;
pub mod crew;
pub mod error;
pub mod llm;
pub mod plan;
pub mod runner;

pub use agents::{AgentExecutor, AgentProfile, AgentRole};
pub use aider::{AiderTool, CodingTool, ToolInfo};
pub use config::RunnerConfig;
pub use crew::Crew;
pub use error::{Result, RunnerError};
pub use llm::{ChatModel, GeminiClient};
pub use plan::{CrewPlan, CrewTask};
pub use runner::ExternalTaskRunner;
