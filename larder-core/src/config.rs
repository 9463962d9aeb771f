//! API configuration from environment variables.

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default recipe service base URL.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Larder/0.1";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnvVar { var: &'static str, value: String },
}

/// Recipe service client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the recipe service, without trailing slash.
    pub base_url: String,
    /// Request timeout. None means requests never time out.
    pub timeout: Option<Duration>,
    /// Minimum spacing between requests to the same host.
    pub rate_limit_ms: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            rate_limit_ms: 0,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `LARDER_API_URL`: service base URL (default: "https://dummyjson.com")
    /// - `LARDER_TIMEOUT_SECS`: request timeout in seconds (default: none)
    /// - `LARDER_RATE_LIMIT_MS`: spacing between requests per host (default: 0, off)
    /// - `LARDER_USER_AGENT`: user agent (default: "Larder/0.1")
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = env::var("LARDER_API_URL") {
            config.base_url = url;
        }

        if let Ok(value) = env::var("LARDER_TIMEOUT_SECS") {
            let secs: u64 = value.parse().map_err(|_| ConfigError::InvalidEnvVar {
                var: "LARDER_TIMEOUT_SECS",
                value: value.clone(),
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        if let Ok(value) = env::var("LARDER_RATE_LIMIT_MS") {
            config.rate_limit_ms = value.parse().map_err(|_| ConfigError::InvalidEnvVar {
                var: "LARDER_RATE_LIMIT_MS",
                value: value.clone(),
            })?;
        }

        if let Ok(agent) = env::var("LARDER_USER_AGENT") {
            config.user_agent = agent;
        }

        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }
}
