//! codingorg server library.
//!
//! Wires the crew runner, the connection registry and the gateway together.
//! The binary only parses arguments, sets up logging and calls [`run`].

pub mod cli;
pub mod error;

use std::path::Path;
use std::sync::Arc;

use codingorg_api::{ApiConfig, AppState};
use codingorg_crew::{config::API_KEY_ENV, Crew, ExternalTaskRunner, RunnerConfig};
use codingorg_events::ConnectionRegistry;
use tracing::{info, warn};

use crate::cli::Cli;
pub use crate::error::{AppError, Result};

/// Loads `path` into the process environment.
///
/// Returns `Ok(false)` when the file does not exist. Variables already set
/// in the environment win over the file.
pub fn load_env_file(path: &Path) -> Result<bool> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Builds the gateway state from parsed arguments and runner configuration.
pub fn build_state(cli: &Cli, runner_config: RunnerConfig) -> (ApiConfig, AppState) {
    let config = cli.api_config();
    let runner: Arc<dyn ExternalTaskRunner> = Arc::new(Crew::new(runner_config));
    let state = AppState::new(config.clone(), Arc::new(ConnectionRegistry::new()), runner);
    (config, state)
}

/// Runs the server until Ctrl-C.
pub async fn run(cli: Cli) -> Result<()> {
    let runner_config = RunnerConfig::from_env().with_project_root(cli.project_root());

    if runner_config.has_api_key() {
        info!(credential = API_KEY_ENV, "credential loaded");
    } else {
        warn!(
            credential = API_KEY_ENV,
            "credential not set; tasks will fail until it is provided"
        );
    }
    info!(
        project_root = %runner_config.project_root.display(),
        chat_model = %runner_config.chat_model,
        aider_bin = %runner_config.aider_bin,
        mode = ?cli.task_mode(),
        "starting codingorg"
    );

    let (config, state) = build_state(&cli, runner_config);
    codingorg_api::serve(config, state).await?;
    Ok(())
}
