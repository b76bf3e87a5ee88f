//! Physical transport abstraction
//!
//! A [`Transport`] performs exactly one network round trip. The retry layer
//! wraps any transport, so tests can substitute an in-process fake.

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Request, Response};
use std::time::Duration;

/// One HTTP round trip
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return whatever the server answered, including
    /// error statuses. Only connection-level failures are `Err`.
    async fn round_trip(&self, request: Request) -> Result<Response>;
}

/// Transport backed by a `reqwest::Client`
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn round_trip(&self, request: Request) -> Result<Response> {
        self.client.execute(request).await.map_err(Error::Http)
    }
}

/// The wait between attempts
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
