//! Client configuration.
//!
//! Sources, lowest precedence first: JSON config file, environment (after
//! loading `.env`), command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use review_core::ReviewMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_DIR_NAME: &str = "vocab-review";
const CONFIG_FILE_NAME: &str = "config.json";

pub const ENV_API_URL: &str = "VOCAB_API_URL";
pub const ENV_API_TOKEN: &str = "VOCAB_API_TOKEN";
pub const ENV_FEEDBACK_DELAY_MS: &str = "VOCAB_FEEDBACK_DELAY_MS";

fn default_api_url() -> String {
    "http://localhost:3000/api".to_string()
}

const fn default_feedback_delay_ms() -> u64 {
    1000
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in config file '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Base URL of the vocabulary service, e.g. `http://localhost:3000/api`.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bearer token sent with every request, if the service wants one.
    #[serde(default)]
    pub token: Option<String>,

    /// How long a spelling result stays on screen before the next word.
    #[serde(default = "default_feedback_delay_ms")]
    pub feedback_delay_ms: u64,

    /// Mode a new review session opens in.
    #[serde(default)]
    pub default_mode: ReviewMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            feedback_delay_ms: default_feedback_delay_ms(),
            default_mode: ReviewMode::default(),
        }
    }
}

impl ClientConfig {
    /// `$CONFIG_DIR/vocab-review/config.json`, if the platform has a config
    /// directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the config file and apply environment overrides.
    ///
    /// An explicitly given file must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Apply overrides from a key lookup (the process environment in
    /// production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(token) = lookup(ENV_API_TOKEN) {
            self.token = (!token.trim().is_empty()).then_some(token);
        }
        if let Some(delay) = lookup(ENV_FEEDBACK_DELAY_MS) {
            self.feedback_delay_ms = delay.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!(
                    "{ENV_FEEDBACK_DELAY_MS} must be a number of milliseconds, got '{delay}'"
                ))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_url.trim();
        if url.is_empty() {
            return Err(ConfigError::Invalid("apiUrl must not be empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "apiUrl must start with http:// or https://, got '{url}'"
            )));
        }
        Ok(())
    }

    pub fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_delay_ms)
    }
}
