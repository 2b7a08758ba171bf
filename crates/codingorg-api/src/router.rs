//! Router configuration and server setup.

use std::future::Future;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ApiConfig;
use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allow_origin(&state.config.cors_origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/ws", get(handlers::ws_handler))
        .route("/start_task", post(handlers::start_task))
        .route("/api/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn allow_origin(origins: &[String]) -> AllowOrigin {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return AllowOrigin::any();
    }
    let values: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    AllowOrigin::list(values)
}

/// Starts the API server and runs until Ctrl-C.
pub async fn serve(config: ApiConfig, state: AppState) -> Result<(), std::io::Error> {
    serve_with_shutdown(config, state, shutdown_signal()).await
}

/// Starts the API server and runs until `shutdown` resolves.
///
/// Once the listener stops, waits for background sessions to finish so each
/// one still publishes its terminal event.
pub async fn serve_with_shutdown<F>(
    config: ApiConfig,
    state: AppState,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on {}", addr);
    let sessions = state.sessions.clone();
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    let pending = sessions.len().await;
    if pending > 0 {
        info!(pending, "waiting for background sessions");
    }
    sessions.drain().await;
    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
