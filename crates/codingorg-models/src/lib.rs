//! Core data models for codingorg.
//!
//! This crate provides the types shared by the connection registry, the
//! orchestration session and the HTTP/WebSocket gateway: events pushed to
//! clients, task requests and their terminal results.

pub mod event;
pub mod ids;
pub mod task;

pub use event::{Event, EventKind};
pub use ids::{ConnectionId, SessionId};
pub use task::{FailureKind, TaskRequest, TaskResult, ValidationError};
