//! Error types for the Attio CLI
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// The main error type for the Attio CLI
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("{message}")]
    AuthRequired { message: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection-level failure from a non-reqwest [`Transport`](crate::http::Transport)
    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("clone request: {message}")]
    RequestClone { message: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Application Errors
    // ============================================================================
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("operation cancelled")]
    Cancelled,

    // ============================================================================
    // Command-line Errors
    // ============================================================================
    #[error("{message}")]
    Usage { message: String },

    #[error("no results")]
    NoResults,

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

/// Structured error returned by the Attio API for non-2xx responses
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiError {
    /// HTTP status code (or the `status_code` reported in the body)
    pub status: u16,
    /// Error category, e.g. `invalid_request_error`
    pub error_type: Option<String>,
    /// Machine-readable code, e.g. `not_found`
    pub code: Option<String>,
    /// Human readable message
    pub message: String,
    /// Raw `Retry-After` header value, kept for rate-limit diagnostics
    pub retry_after: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, &self.error_type) {
            (Some(code), _) => write!(
                f,
                "attio api error ({} {code}): {}",
                self.status, self.message
            ),
            (None, Some(kind)) => write!(
                f,
                "attio api error ({} {kind}): {}",
                self.status, self.message
            ),
            (None, None) => write!(f, "attio api error ({}): {}", self.status, self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            ..Self::default()
        }
    }

    /// Build a structured error from a raw error response.
    ///
    /// The body is parsed leniently: fields that are missing or have the
    /// wrong shape are ignored and the message falls back to the raw body,
    /// then to the canonical reason phrase.
    pub fn from_response_parts(status: u16, retry_after: Option<&str>, body: &[u8]) -> Self {
        let raw: serde_json::Map<String, serde_json::Value> = match serde_json::from_slice(body)
        {
            Ok(serde_json::Value::Object(map)) => map,
            Ok(_) => serde_json::Map::new(),
            Err(e) => {
                tracing::debug!(error = %e, "failed to parse API error response as JSON");
                serde_json::Map::new()
            }
        };

        let wire_status = status;
        let status = raw
            .get("status_code")
            .and_then(int_from_value)
            .or_else(|| raw.get("statusCode").and_then(int_from_value))
            .unwrap_or(wire_status);

        let message = raw
            .get("message")
            .and_then(string_from_value)
            .or_else(|| {
                let trimmed = String::from_utf8_lossy(body).trim().to_string();
                (!trimmed.is_empty()).then_some(trimmed)
            })
            .unwrap_or_else(|| {
                StatusCode::from_u16(wire_status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or_default()
                    .to_string()
            });

        Self {
            status,
            error_type: raw.get("type").and_then(string_from_value),
            code: raw.get("code").and_then(string_from_value),
            message,
            retry_after: retry_after
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        }
    }
}

fn int_from_value(value: &serde_json::Value) -> Option<u16> {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f as u64))
            .and_then(|n| u16::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn string_from_value(value: &serde_json::Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an authentication-required error
    pub fn auth_required(message: impl Into<String>) -> Self {
        Self::AuthRequired {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a usage error for bad command-line input
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Borrow the structured API error, if this is one
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.as_api().is_some_and(|e| {
            e.code.as_deref() == Some("not_found") || e.status == StatusCode::NOT_FOUND.as_u16()
        })
    }

    pub fn is_auth_error(&self) -> bool {
        if matches!(self, Error::AuthRequired { .. }) {
            return true;
        }
        self.as_api().is_some_and(|e| {
            e.error_type.as_deref() == Some("auth_error")
                || e.status == StatusCode::UNAUTHORIZED.as_u16()
                || e.status == StatusCode::FORBIDDEN.as_u16()
        })
    }

    pub fn is_rate_limited(&self) -> bool {
        self.as_api()
            .is_some_and(|e| e.status == StatusCode::TOO_MANY_REQUESTS.as_u16())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// Check if this error is transient at the transport level. The retry
    /// transport replays a failed attempt only when this holds.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::Transport { .. } | Error::Timeout { .. } => true,
            Error::Api(e) => is_retryable_status(e.status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable: 429 or any 5xx
pub fn is_retryable_status(status: u16) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS.as_u16() || status >= 500
}

/// Result type alias for the Attio CLI
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
