//! Request DTOs for the API.

use codingorg_models::TaskRequest;
use serde::Deserialize;

/// Start task request.
#[derive(Debug, Clone, Deserialize)]
pub struct StartTaskRequest {
    /// What the crew should build.
    pub prompt: String,
}

impl From<StartTaskRequest> for TaskRequest {
    fn from(req: StartTaskRequest) -> Self {
        TaskRequest::new(req.prompt)
    }
}
