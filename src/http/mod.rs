//! HTTP transport module
//!
//! Provides the physical transport, the retrying wrapper and the optional
//! client-side rate limiter.
//!
//! # Features
//!
//! - **Automatic Retries**: 429 and 5xx responses, connection failures
//! - **Retry-After**: integer seconds or HTTP-date, with back-off fallback
//! - **Safe Replay**: requests are cloned per attempt; streaming bodies fail fast
//! - **Rate Limiting**: Token bucket rate limiter using governor

mod rate_limit;
mod retry;
mod transport;

pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use retry::{
    backoff, parse_retry_after, parse_retry_after_at, retry_delay, should_retry, RetryTransport,
    DEFAULT_MAX_RETRIES,
};
pub use transport::{ReqwestTransport, Sleeper, TokioSleeper, Transport};
