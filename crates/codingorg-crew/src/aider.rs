//! The coding tool: aider run as a subprocess.
//!
//! Output is captured in full when the process exits; nothing is streamed.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, trace, warn};

use crate::config::RunnerConfig;
use crate::error::{Result, RunnerError};

/// Information about a coding tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Unique identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// What the tool is for.
    pub description: String,
    /// Executable to launch.
    pub command: String,
}

/// A tool that edits the project according to instructions.
#[async_trait]
pub trait CodingTool: Send + Sync {
    /// Returns information about this tool.
    fn info(&self) -> &ToolInfo;

    /// Whether the tool can be launched at all.
    fn is_available(&self) -> bool {
        true
    }

    /// Performs the instructions and returns a report.
    async fn run(&self, instructions: &str) -> Result<String>;
}

/// Runs `aider --message <instructions>` in the project root.
pub struct AiderTool {
    info: ToolInfo,
    model: Option<String>,
    api_key: Option<String>,
    project_root: PathBuf,
}

impl AiderTool {
    /// Creates the tool from runner configuration.
    pub fn new(config: &RunnerConfig) -> Self {
        Self {
            info: ToolInfo {
                id: "aider".to_string(),
                name: "Aider Coding Tool".to_string(),
                description: "A tool to interact with the Aider AI pair programming CLI. Use \
                              this tool to perform coding tasks like writing new code, \
                              modifying existing code, adding tests, or fixing bugs."
                    .to_string(),
                command: config.aider_bin.clone(),
            },
            model: config.aider_model.clone(),
            api_key: config.api_key().map(str::to_string),
            project_root: config.project_root.clone(),
        }
    }

    /// Arguments passed to the executable.
    pub fn command_args(&self, instructions: &str) -> Vec<String> {
        let mut args = vec!["--message".to_string(), instructions.to_string()];
        if let Some(model) = &self.model {
            args.push("--model".to_string());
            args.push(model.clone());
        }
        args
    }
}

#[async_trait]
impl CodingTool for AiderTool {
    fn info(&self) -> &ToolInfo {
        &self.info
    }

    fn is_available(&self) -> bool {
        which::which(&self.info.command).is_ok()
    }

    async fn run(&self, instructions: &str) -> Result<String> {
        let args = self.command_args(instructions);
        info!(
            cmd = %self.info.command,
            cwd = %self.project_root.display(),
            instructions_len = instructions.len(),
            "running aider"
        );

        let mut command = Command::new(&self.info.command);
        command
            .args(&args)
            .current_dir(&self.project_root)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        if let Some(key) = &self.api_key {
            command.env("GEMINI_API_KEY", key);
        }

        let output = command.output().await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => RunnerError::BinaryNotFound(self.info.command.clone()),
            _ => RunnerError::Io(e),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        trace!(
            status = %output.status,
            stdout_len = stdout.len(),
            stderr_len = stderr.len(),
            "aider exited"
        );

        if !output.status.success() {
            warn!(status = %output.status, "aider execution failed");
            return Err(RunnerError::ToolFailed {
                tool: "aider".to_string(),
                status: output.status.to_string(),
                stderr,
            });
        }

        debug!(stdout_len = stdout.len(), "aider task completed");
        Ok(format!(
            "Aider task completed. Output:\n{}\n{}",
            stdout, stderr
        ))
    }
}
