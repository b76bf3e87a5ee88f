//! Retrying transport
//!
//! Wraps a base [`Transport`] and replays a logical request until it gets a
//! non-retryable answer or runs out of attempts:
//! - 429 and any 5xx are retried; every other status is returned as-is
//! - connection-level failures are retried
//! - `Retry-After` (seconds or HTTP-date) wins over the back-off sequence
//! - bodies of discarded responses are drained before the next attempt

use super::rate_limit::RateLimiter;
use super::transport::{Sleeper, TokioSleeper, Transport};
use crate::error::{is_retryable_status, Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::header::RETRY_AFTER;
use reqwest::{Request, Response, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default number of retries after the first attempt
pub const DEFAULT_MAX_RETRIES: i32 = 3;

const INITIAL_BACKOFF: Duration = Duration::from_millis(250);
const MAX_BACKOFF: Duration = Duration::from_secs(5);

/// Transport that retries rate-limited and failing requests
pub struct RetryTransport<T> {
    base: T,
    max_retries: i32,
    sleeper: Arc<dyn Sleeper>,
    rate_limiter: Option<RateLimiter>,
}

impl<T: Transport> RetryTransport<T> {
    /// Wrap `base`. Negative `max_retries` means a single attempt.
    pub fn new(base: T, max_retries: i32) -> Self {
        Self {
            base,
            max_retries,
            sleeper: Arc::new(TokioSleeper),
            rate_limiter: None,
        }
    }

    /// Replace the wait between attempts
    #[must_use]
    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Arc::new(sleeper);
        self
    }

    /// Throttle every physical attempt through a token bucket
    #[must_use]
    pub fn with_rate_limiter(mut self, limiter: RateLimiter) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    /// Effective retry ceiling after clamping
    pub fn max_retries(&self) -> i32 {
        self.max_retries.max(0)
    }

    /// Get the wrapped transport
    pub fn base(&self) -> &T {
        &self.base
    }

    /// Send one logical request.
    ///
    /// Returns the first non-retryable response, or whatever the last attempt
    /// produced once the retry budget is spent.
    pub async fn send(&self, request: Request) -> Result<Response> {
        let max_retries = self.max_retries();
        let mut attempt = 0;

        loop {
            let attempt_request = clone_request(&request)?;

            if let Some(ref limiter) = self.rate_limiter {
                limiter.wait().await;
            }

            match self.base.round_trip(attempt_request).await {
                Err(e) => {
                    if !e.is_retryable() {
                        return Err(e);
                    }
                    if attempt >= max_retries {
                        if max_retries > 0 {
                            warn!(attempts = attempt + 1, error = %e, "request failed, giving up");
                        }
                        return Err(e);
                    }
                    let wait = backoff(attempt);
                    debug!(attempt = attempt + 1, ?wait, error = %e, "request failed, retrying");
                    self.sleeper.sleep(wait).await;
                }
                Ok(response) => {
                    let status = response.status();
                    if !should_retry(status) || attempt >= max_retries {
                        return Ok(response);
                    }

                    let retry_after = response
                        .headers()
                        .get(RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    let wait = retry_delay(retry_after.as_deref(), attempt);
                    debug!(
                        status = status.as_u16(),
                        attempt = attempt + 1,
                        ?wait,
                        "retryable response"
                    );
                    drain_and_close(response).await;
                    self.sleeper.sleep(wait).await;
                }
            }

            attempt += 1;
        }
    }
}

#[async_trait]
impl<T: Transport> Transport for RetryTransport<T> {
    async fn round_trip(&self, request: Request) -> Result<Response> {
        self.send(request).await
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for RetryTransport<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryTransport")
            .field("base", &self.base)
            .field("max_retries", &self.max_retries)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// 429 or any 5xx
pub fn should_retry(status: StatusCode) -> bool {
    is_retryable_status(status.as_u16())
}

/// Wait before the next attempt: a usable `Retry-After` hint, else back-off
pub fn retry_delay(retry_after: Option<&str>, attempt: i32) -> Duration {
    retry_after
        .and_then(parse_retry_after)
        .unwrap_or_else(|| backoff(attempt))
}

/// 250ms doubling per attempt, capped at 5s. Negative attempts count as 0.
pub fn backoff(attempt: i32) -> Duration {
    let mut delay = INITIAL_BACKOFF;
    for _ in 0..attempt.max(0) {
        delay *= 2;
        if delay >= MAX_BACKOFF {
            return MAX_BACKOFF;
        }
    }
    delay
}

/// Parse a `Retry-After` value relative to the current time
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    parse_retry_after_at(value, Utc::now())
}

/// Parse a `Retry-After` value as positive seconds or a future HTTP-date.
///
/// Zero, negative and past values are rejected so the caller falls back to
/// the back-off sequence.
pub fn parse_retry_after_at(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(seconds) = value.parse::<i64>() {
        return u64::try_from(seconds)
            .ok()
            .filter(|s| *s > 0)
            .map(Duration::from_secs);
    }

    let date = parse_http_date(value)?;
    (date - now).to_std().ok().filter(|d| !d.is_zero())
}

/// IMF-fixdate, RFC 850 and asctime forms
fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc2822(value) {
        return Some(date.with_timezone(&Utc));
    }
    ["%A, %d-%b-%y %H:%M:%S GMT", "%a %b %e %H:%M:%S %Y"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

/// Clone a request for one physical attempt.
///
/// Streaming bodies cannot be replayed, so they fail here on the first
/// attempt instead of sending a truncated retry later.
fn clone_request(request: &Request) -> Result<Request> {
    request.try_clone().ok_or_else(|| Error::RequestClone {
        message: format!(
            "{} {} has a streaming body that cannot be replayed",
            request.method(),
            request.url()
        ),
    })
}

/// Read the rest of a discarded response so the connection can be reused
async fn drain_and_close(response: Response) {
    let _ = response.bytes().await;
}
