//! Task submission handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use codingorg_models::TaskRequest;
use tracing::{info, warn};

use crate::config::TaskMode;
use crate::error::Result;
use crate::state::AppState;
use crate::types::{StartTaskRequest, TaskAcceptedResponse, TaskFinishedResponse};

/// POST /start_task - Run a prompt through a new session.
///
/// In background mode the session is spawned on the state's tracker and the
/// reply only names it; the result reaches clients as events. In blocking mode the reply carries
/// the result.
pub async fn start_task(
    State(state): State<AppState>,
    payload: std::result::Result<Json<StartTaskRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(body) = payload?;
    let request = TaskRequest::from(body);
    request.validate()?;

    let mut session = state.new_session();
    let session_id = session.id().clone();
    info!(
        session_id = %session_id,
        mode = ?state.config.task_mode,
        "task received"
    );

    match state.config.task_mode {
        TaskMode::Background => {
            state
                .sessions
                .spawn(async move {
                    if let Err(e) = session.run(request).await {
                        warn!(session_id = %session.id(), error = %e, "background task rejected");
                    }
                })
                .await;
            Ok((
                StatusCode::ACCEPTED,
                Json(TaskAcceptedResponse {
                    message: "Task accepted.".to_string(),
                    session_id,
                }),
            )
                .into_response())
        }
        TaskMode::Blocking => {
            let result = session.run(request).await?;
            Ok(Json(TaskFinishedResponse {
                message: "Task execution finished (sync).".to_string(),
                result,
            })
            .into_response())
        }
    }
}
