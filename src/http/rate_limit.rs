//! Client-side rate limiting
//!
//! Uses the governor crate for token bucket rate limiting. Attio enforces its
//! own limits and answers 429 when they are hit; a local bucket keeps bulk
//! `--all` fetches under them so the retry layer rarely has to back off.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::debug;

/// Requests per second and burst for the local token bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimiterConfig {
    pub requests_per_second: u32,
    /// Max tokens in the bucket
    pub burst_size: u32,
}

impl RateLimiterConfig {
    pub fn new(requests_per_second: u32, burst_size: u32) -> Self {
        Self {
            requests_per_second,
            burst_size,
        }
    }

    /// Same burst as the per-second rate
    pub fn per_second(requests_per_second: u32) -> Self {
        Self::new(requests_per_second, requests_per_second)
    }
}

/// Token bucket shared by every attempt of a client
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
    config: RateLimiterConfig,
}

impl RateLimiter {
    /// Zero rates are treated as one
    pub fn new(config: &RateLimiterConfig) -> Self {
        let quota = Quota::per_second(
            NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN),
        )
        .allow_burst(NonZeroU32::new(config.burst_size).unwrap_or(NonZeroU32::MIN));

        Self {
            limiter: Arc::new(Governor::direct(quota)),
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &RateLimiterConfig {
        &self.config
    }

    /// Take a slot, waiting for the bucket to refill when it is empty
    pub async fn wait(&self) {
        if self.try_acquire() {
            return;
        }
        debug!(
            requests_per_second = self.config.requests_per_second,
            "client-side rate limit reached, waiting"
        );
        self.limiter.until_ready().await;
    }

    /// Take a slot if one is free, without waiting
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
