//! Client configuration.
//!
//! Defaults, environment overrides, and builder-style setters for the API
//! address, request timeout, token location and GET retry policy.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default API address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable overriding the API base address.
pub const ENV_API_URL: &str = "MUSICBOXD_API_URL";
/// Environment variable overriding the request timeout (seconds).
pub const ENV_TIMEOUT_SECS: &str = "MUSICBOXD_TIMEOUT_SECS";
/// Environment variable overriding the token storage file.
pub const ENV_TOKEN_PATH: &str = "MUSICBOXD_TOKEN_PATH";
/// Environment variable setting how often failed GETs are retried.
pub const ENV_GET_RETRIES: &str = "MUSICBOXD_GET_RETRIES";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("API URL must start with http:// or https:// (got {0:?})")]
    InvalidApiUrl(String),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("{name} must be a non-negative integer (got {value:?})")]
    InvalidNumber { name: &'static str, value: String },
}

/// Configuration for the client core.
///
/// # Example
///
/// ```
/// use musicboxd::config::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_api_base_url("https://api.example.com/")
///     .with_get_retries(2);
/// assert_eq!(config.api_base_url, "https://api.example.com");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base address every request path is appended to (no trailing slash)
    pub api_base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Token storage file; `None` means the default under the home directory
    pub token_path: Option<PathBuf>,
    /// Extra attempts for GET requests that fail at the network level
    pub get_retries: u32,
    /// Delay before each retry, multiplied by the attempt number
    pub retry_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: 30,
            token_path: None,
            get_retries: 0,
            retry_delay_ms: 250,
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base address. A trailing slash is dropped.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = Some(path.into());
        self
    }

    pub fn with_get_retries(mut self, retries: u32) -> Self {
        self.get_retries = retries;
        self
    }

    pub fn with_retry_delay_ms(mut self, delay_ms: u64) -> Self {
        self.retry_delay_ms = delay_ms;
        self
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Delay before retry number `attempt` (1-based).
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_delay_ms.saturating_mul(u64::from(attempt)))
    }

    /// Build a config from defaults plus `MUSICBOXD_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_API_URL) {
            config = config.with_api_base_url(url);
        }
        if let Ok(value) = std::env::var(ENV_TIMEOUT_SECS) {
            config.request_timeout_secs = parse_number(ENV_TIMEOUT_SECS, &value)?;
        }
        if let Ok(path) = std::env::var(ENV_TOKEN_PATH) {
            if !path.is_empty() {
                config.token_path = Some(PathBuf::from(path));
            }
        }
        if let Ok(value) = std::env::var(ENV_GET_RETRIES) {
            config.get_retries = parse_number(ENV_GET_RETRIES, &value)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidApiUrl(self.api_base_url.clone()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        })
}
