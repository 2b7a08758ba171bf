//! Command-line interface definition using clap.

use clap::Parser;
use std::path::PathBuf;

use codingorg_api::{ApiConfig, TaskMode};

/// codingorg - development crew server
#[derive(Parser, Debug)]
#[command(name = "codingorg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Host to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind to
    #[arg(short, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Origins allowed by CORS, comma separated ("*" allows any)
    #[arg(long, env = "CORS_ORIGINS", value_delimiter = ',', default_value = "*")]
    pub cors_origins: Vec<String>,

    /// Directory the coding tool works in (default: current directory)
    #[arg(long, env = "CODINGORG_PROJECT_ROOT")]
    pub project_root: Option<PathBuf>,

    /// Environment file loaded before anything else
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,

    /// Run tasks inside the request and reply with the result
    #[arg(
        long,
        env = "CODINGORG_BLOCKING_TASKS",
        action = clap::ArgAction::SetTrue,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub blocking_tasks: bool,
}

impl Cli {
    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    /// Returns the project root.
    pub fn project_root(&self) -> PathBuf {
        self.project_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Returns the task submission mode.
    pub fn task_mode(&self) -> TaskMode {
        if self.blocking_tasks {
            TaskMode::Blocking
        } else {
            TaskMode::Background
        }
    }

    /// Builds the gateway configuration.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.host.clone(), self.port)
            .with_cors_origins(self.cors_origins.clone())
            .with_task_mode(self.task_mode())
    }
}
