//! Environment-driven configuration

use crate::chat::state::{DEFAULT_FALLBACK, DEFAULT_GREETING};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8001/ask";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ASKBOT_ENDPOINT must be an http(s) URL, got {0:?}")]
    InvalidEndpoint(String),
    #[error("ASKBOT_TIMEOUT_SECS must be a positive integer, got {0:?}")]
    InvalidTimeout(String),
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Full URL of the answer service, e.g. `http://127.0.0.1:8001/ask`
    pub endpoint: String,
    /// Upper bound on one exchange; expiry takes the failure path
    pub exchange_timeout: Duration,
    pub greeting: String,
    pub fallback_text: String,
    pub log_path: PathBuf,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            exchange_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            greeting: DEFAULT_GREETING.to_string(),
            fallback_text: DEFAULT_FALLBACK.to_string(),
            log_path: default_log_path(None),
        }
    }
}

impl ChatConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let endpoint = lookup("ASKBOT_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = endpoint.trim().to_string();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint(endpoint));
        }

        let exchange_timeout = match lookup("ASKBOT_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let greeting = lookup("ASKBOT_GREETING")
            .filter(|g| !g.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GREETING.to_string());

        let log_path = lookup("ASKBOT_LOG_PATH")
            .map_or_else(|| default_log_path(lookup("HOME")), PathBuf::from);

        Ok(Self {
            endpoint,
            exchange_timeout,
            greeting,
            fallback_text: DEFAULT_FALLBACK.to_string(),
            log_path,
        })
    }
}

fn default_log_path(home: Option<String>) -> PathBuf {
    let home = home.unwrap_or_else(|| "/tmp".to_string());
    PathBuf::from(home).join(".askbot").join("askbot.log")
}
