//! Response DTOs for the API.

use codingorg_models::{SessionId, TaskResult};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
    /// Registered WebSocket connections.
    pub connections: usize,
}

/// Reply to a task accepted for background execution.
#[derive(Debug, Clone, Serialize)]
pub struct TaskAcceptedResponse {
    /// Human-readable status.
    pub message: String,
    /// Session whose events carry the result.
    pub session_id: SessionId,
}

/// Reply to a task run inside the request.
#[derive(Debug, Clone, Serialize)]
pub struct TaskFinishedResponse {
    /// Human-readable status.
    pub message: String,
    /// Outcome of the session.
    pub result: TaskResult,
}
