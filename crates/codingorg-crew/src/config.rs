//! Runner configuration.
//!
//! Values are read from the environment once, at process start.
//!
//! # Environment Variables
//!
//! - `GOOGLE_API_KEY`: credential for the model and for aider (required)
//! - `GEMINI_MODEL`: model used by the manager agent
//! - `AIDER_BIN`: aider executable (default `aider`)
//! - `AIDER_MODEL`: model passed to aider with `--model`

use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable holding the primary credential.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Environment variable selecting the manager's model.
pub const CHAT_MODEL_ENV: &str = "GEMINI_MODEL";

/// Environment variable overriding the aider executable.
pub const AIDER_BIN_ENV: &str = "AIDER_BIN";

/// Environment variable selecting aider's model.
pub const AIDER_MODEL_ENV: &str = "AIDER_MODEL";

const DEFAULT_CHAT_MODEL: &str = "gemini-1.5-pro-latest";
const DEFAULT_AIDER_BIN: &str = "aider";

/// Configuration for the crew runner.
#[derive(Clone)]
pub struct RunnerConfig {
    api_key: Option<String>,
    /// Model used for manager tasks.
    pub chat_model: String,
    /// Aider executable name or path.
    pub aider_bin: String,
    /// Model passed to aider, if any.
    pub aider_model: Option<String>,
    /// Directory aider runs in.
    pub project_root: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            aider_bin: DEFAULT_AIDER_BIN.to_string(),
            aider_model: None,
            project_root: PathBuf::from("."),
        }
    }
}

impl fmt::Debug for RunnerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunnerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("chat_model", &self.chat_model)
            .field("aider_bin", &self.aider_bin)
            .field("aider_model", &self.aider_model)
            .field("project_root", &self.project_root)
            .finish()
    }
}

impl RunnerConfig {
    /// Creates a config with default values and no credential.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            api_key: get(API_KEY_ENV),
            chat_model: get(CHAT_MODEL_ENV).unwrap_or(defaults.chat_model),
            aider_bin: get(AIDER_BIN_ENV).unwrap_or(defaults.aider_bin),
            aider_model: get(AIDER_MODEL_ENV),
            project_root: defaults.project_root,
        }
    }

    /// Sets the credential.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the manager's model.
    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    /// Sets the aider executable.
    pub fn with_aider_bin(mut self, bin: impl Into<String>) -> Self {
        self.aider_bin = bin.into();
        self
    }

    /// Sets aider's model.
    pub fn with_aider_model(mut self, model: impl Into<String>) -> Self {
        self.aider_model = Some(model.into());
        self
    }

    /// Sets the directory aider runs in.
    pub fn with_project_root(mut self, root: impl AsRef<Path>) -> Self {
        self.project_root = root.as_ref().to_path_buf();
        self
    }

    /// The credential, if present and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }

    /// True if the primary credential is available.
    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }
}
