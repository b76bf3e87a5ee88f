//! Request execution and response decoding

use super::config::ClientConfig;
use crate::error::{ApiError, Error, Result};
use crate::http::{RateLimiter, ReqwestTransport, RetryTransport, Transport};
use crate::types::{Envelope, JsonObject, JsonValue};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER, USER_AGENT};
use reqwest::{Client, Method, Request, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Query string builder that skips unset values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter unconditionally
    #[must_use]
    pub fn set(mut self, key: &str, value: impl ToString) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Set a parameter when the value is present and not blank
    #[must_use]
    pub fn opt(self, key: &str, value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => self.set(key, v),
            None => self,
        }
    }

    /// Set a numeric parameter when it is positive
    #[must_use]
    pub fn positive(self, key: &str, value: usize) -> Self {
        if value > 0 {
            self.set(key, value)
        } else {
            self
        }
    }

    /// Set `key=true` when the flag is on
    #[must_use]
    pub fn flag(self, key: &str, on: bool) -> Self {
        if on {
            self.set(key, "true")
        } else {
            self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

/// Client for the Attio REST API
pub struct AttioClient<T = ReqwestTransport> {
    http: Client,
    transport: RetryTransport<T>,
    config: ClientConfig,
}

impl AttioClient<ReqwestTransport> {
    /// Create a client that talks to the network
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder().build()?;
        let transport = RetryTransport::new(ReqwestTransport::new(http.clone()), config.max_retries);
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> AttioClient<T> {
    /// Create a client over an explicit transport stack
    pub fn with_transport(config: ClientConfig, transport: RetryTransport<T>) -> Self {
        let transport = match config.rate_limit {
            Some(ref limit) => transport.with_rate_limiter(RateLimiter::new(limit)),
            None => transport,
        };
        Self {
            http: Client::new(),
            transport,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build an endpoint URL from path segments, which are trimmed and
    /// percent-encoded
    pub fn endpoint(&self, segments: &[&str], query: &Query) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url)?;
        url.path_segments_mut()
            .map_err(|()| Error::invalid_value("base_url", "cannot be a base URL"))?
            .pop_if_empty()
            .extend(segments.iter().map(|s| s.trim()));
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.pairs());
        }
        Ok(url)
    }

    /// Send one logical request and decode the JSON answer.
    ///
    /// Status >= 400 becomes [`Error::Api`]. A 204 or an empty body yields
    /// `JsonValue::Null`.
    pub async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<&JsonValue>,
    ) -> Result<JsonValue> {
        let request = self.build_request(method, url, body)?;
        let timeout = self.config.timeout;

        tokio::time::timeout(timeout, self.round_trip(request))
            .await
            .map_err(|_| Error::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            })?
    }

    /// [`execute`](Self::execute) and deserialize into `R`
    pub async fn request<R: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&JsonValue>,
    ) -> Result<R> {
        let value = self.execute(method, url, body).await?;
        serde_json::from_value(value).map_err(|e| Error::decode(e.to_string()))
    }

    /// Request a `{"data": {...}}` envelope and unwrap it
    pub(crate) async fn data_object(
        &self,
        method: Method,
        url: Url,
        body: Option<&JsonValue>,
    ) -> Result<JsonObject> {
        self.data(method, url, body).await
    }

    /// Request a `{"data": [...]}` envelope and unwrap it
    pub(crate) async fn data_array(
        &self,
        method: Method,
        url: Url,
        body: Option<&JsonValue>,
    ) -> Result<Vec<JsonObject>> {
        self.data(method, url, body).await
    }

    /// An empty body unwraps to `R::default()` like an empty envelope
    async fn data<R: DeserializeOwned + Default>(
        &self,
        method: Method,
        url: Url,
        body: Option<&JsonValue>,
    ) -> Result<R> {
        let value = self.execute(method, url, body).await?;
        if value.is_null() {
            return Ok(R::default());
        }
        let envelope: Envelope<R> =
            serde_json::from_value(value).map_err(|e| Error::decode(e.to_string()))?;
        Ok(envelope.data)
    }

    fn build_request(&self, method: Method, url: Url, body: Option<&JsonValue>) -> Result<Request> {
        let mut req = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        if let Some(ref key) = self.config.api_key {
            req = req.header(AUTHORIZATION, format!("Bearer {key}"));
        }
        if !self.config.user_agent.is_empty() {
            req = req.header(USER_AGENT, self.config.user_agent.as_str());
        }
        if let Some(body) = body {
            req = req.body(serde_json::to_vec(body)?);
        }

        Ok(req.build()?)
    }

    async fn round_trip(&self, request: Request) -> Result<JsonValue> {
        let method = request.method().clone();
        let url = request.url().clone();

        let response = self.transport.send(request).await?;
        let status = response.status();
        debug!(%method, %url, status = status.as_u16(), "request finished");

        decode_response(response).await
    }
}

async fn decode_response(response: Response) -> Result<JsonValue> {
    let status = response.status();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.bytes().await?;

    if status.as_u16() >= 400 {
        return Err(ApiError::from_response_parts(status.as_u16(), retry_after.as_deref(), &body).into());
    }

    if status == StatusCode::NO_CONTENT || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(JsonValue::Null);
    }

    serde_json::from_slice(&body).map_err(|e| Error::decode(e.to_string()))
}

impl<T> std::fmt::Debug for AttioClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttioClient")
            .field("base_url", &self.config.base_url)
            .field("has_api_key", &self.config.api_key.is_some())
            .field("timeout", &self.config.timeout)
            .field("max_retries", &self.config.max_retries)
            .finish_non_exhaustive()
    }
}
