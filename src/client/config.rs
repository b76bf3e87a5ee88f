//! Client configuration
//!
//! Everything the client needs is passed in explicitly; there are no
//! process-wide defaults to mutate.

use crate::http::{RateLimiterConfig, DEFAULT_MAX_RETRIES};
use std::time::Duration;

/// Production API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.attio.com";

/// Bound on one logical request, retries included
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`AttioClient`](super::AttioClient)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    /// Bearer token; no `Authorization` header when absent
    pub api_key: Option<String>,
    /// Whole-request timeout covering every attempt
    pub timeout: Duration,
    /// Retries after the first attempt
    pub max_retries: i32,
    /// Client-side throttle
    pub rate_limit: Option<RateLimiterConfig>,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            rate_limit: None,
            user_agent: format!("attio-cli/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL; blank falls back to the default
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        let url = url.trim();
        self.config.base_url = if url.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            url.trim_end_matches('/').to_string()
        };
        self
    }

    /// Set the API key; blank keys are dropped
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into().trim().to_string();
        self.config.api_key = (!key.is_empty()).then_some(key);
        self
    }

    /// Set the request timeout; zero is ignored
    pub fn timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.config.timeout = timeout;
        }
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: i32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into().trim().to_string();
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
