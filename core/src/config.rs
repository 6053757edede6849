//! Configuration of the underlying HTTP client.
//!
//! # Design
//! Timeouts and error behaviour belong to the client, not to the transports.
//! A `ClientConfig` is built once at startup, from serde or the environment,
//! and handed to `UreqClient::new`.

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;

pub const ENV_CONNECT_TIMEOUT_MS: &str = "HTTP_TRANSPORT_CONNECT_TIMEOUT_MS";
pub const ENV_TIMEOUT_MS: &str = "HTTP_TRANSPORT_TIMEOUT_MS";
pub const ENV_STATUS_AS_ERROR: &str = "HTTP_TRANSPORT_STATUS_AS_ERROR";
pub const ENV_USER_AGENT: &str = "HTTP_TRANSPORT_USER_AGENT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Time allowed to establish a connection. `None` waits forever.
    pub timeout_connect_ms: Option<u64>,
    /// Time allowed for a whole call. `None` waits forever.
    pub timeout_global_ms: Option<u64>,
    /// Report 4xx/5xx responses as bad-response failures with the response
    /// attached, instead of returning them.
    pub status_as_error: bool,
    /// Sent as `User-Agent` unless the request sets one.
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_connect_ms: Some(DEFAULT_CONNECT_TIMEOUT_MS),
            timeout_global_ms: None,
            status_as_error: true,
            user_agent: None,
        }
    }
}

/// An environment variable holds a value that cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {name}")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
}

impl ClientConfig {
    /// Defaults overridden by `HTTP_TRANSPORT_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_CONNECT_TIMEOUT_MS) {
            config.timeout_connect_ms = parse_timeout(ENV_CONNECT_TIMEOUT_MS, value)?;
        }
        if let Some(value) = lookup(ENV_TIMEOUT_MS) {
            config.timeout_global_ms = parse_timeout(ENV_TIMEOUT_MS, value)?;
        }
        if let Some(value) = lookup(ENV_STATUS_AS_ERROR) {
            config.status_as_error = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError {
                        name: ENV_STATUS_AS_ERROR,
                        value,
                    })
                }
            };
        }
        if let Some(value) = lookup(ENV_USER_AGENT) {
            config.user_agent = Some(value).filter(|ua| !ua.is_empty());
        }

        Ok(config)
    }
}

/// `0` and the empty string disable the timeout.
fn parse_timeout(name: &'static str, value: String) -> Result<Option<u64>, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "0" {
        return Ok(None);
    }
    match trimmed.parse() {
        Ok(ms) => Ok(Some(ms)),
        Err(_) => Err(ConfigError { name, value }),
    }
}
