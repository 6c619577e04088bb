//! Authenticated HTTP transport for the Artboard API
//!
//! The transport is deliberately thin: it builds requests, attaches
//! credentials, and classifies non-success responses through the error
//! mapper exactly once. Retry and polling live above it.

use crate::{Error, Result};
use bytes::Bytes;
use reqwest::{Client, Method, Response, header};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{trace, warn};
use url::Url;

/// Query parameters as name/value pairs, in request order
pub type Query = Vec<(String, String)>;

/// Low-level request sender holding the HTTP client and credentials
#[derive(Debug, Clone)]
pub struct Transport {
    http: Client,
    base_url: Url,
    api_key: String,
    user_agent: String,
    request_timeout: Duration,
}

impl Transport {
    pub(crate) fn new(
        http: Client,
        base_url: Url,
        api_key: String,
        user_agent: String,
        request_timeout: Duration,
    ) -> Self {
        Self {
            http,
            base_url,
            api_key,
            user_agent,
            request_timeout,
        }
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send a request and decode the JSON response body
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Query>,
        body: Option<&serde_json::Value>,
    ) -> Result<T> {
        let response = self.execute(method, path, query, body).await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        trace!(%status, body_len = bytes.len(), "decoding response body");
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send a request and discard the response body (delete/revoke endpoints)
    pub async fn send_no_content(
        &self,
        method: Method,
        path: &str,
        query: Option<&Query>,
        body: Option<&serde_json::Value>,
    ) -> Result<()> {
        self.execute(method, path, query, body).await?;
        Ok(())
    }

    /// Send a request and return the raw response bytes (binary downloads)
    pub async fn send_bytes(&self, method: Method, path: &str) -> Result<Bytes> {
        let response = self.execute(method, path, None, None).await?;
        Ok(response.bytes().await?)
    }

    /// Upload a binary body, decoding the JSON response
    pub async fn send_upload<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&Query>,
        content_type: &str,
        payload: Bytes,
    ) -> Result<T> {
        let url = self.endpoint(path, query)?;
        let started = Instant::now();
        let result = self
            .prepare(self.http.post(url))
            .header(header::CONTENT_TYPE, content_type)
            .body(payload)
            .send()
            .await;
        let response = check(result, started).await?;
        Ok(serde_json::from_slice(&response.bytes().await?)?)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: Option<&Query>,
        body: Option<&serde_json::Value>,
    ) -> Result<Response> {
        let url = self.endpoint(path, query)?;
        trace!(%method, %url, "sending request");

        let mut request = self.prepare(self.http.request(method, url));
        if let Some(json) = body {
            request = request.json(json);
        }

        let started = Instant::now();
        check(request.send().await, started).await
    }

    fn prepare(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .bearer_auth(&self.api_key)
            .timeout(self.request_timeout)
            .header(header::USER_AGENT, &self.user_agent)
    }

    fn endpoint(&self, path: &str, query: Option<&Query>) -> Result<Url> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|_| Error::invalid_url(format!("{}{path}", self.base_url)))?;
        if let Some(pairs) = query {
            if !pairs.is_empty() {
                url.query_pairs_mut().extend_pairs(pairs);
            }
        }
        Ok(url)
    }
}

/// Resolve a response or transport failure into the error taxonomy.
///
/// An aborted request with no response becomes [`Error::Timeout`]; a 4xx or
/// 5xx response is classified by [`Error::from_response`], exactly once per
/// response. Anything below 400 passes through as success.
async fn check(result: reqwest::Result<Response>, started: Instant) -> Result<Response> {
    let response = match result {
        Ok(response) => response,
        Err(err) if err.is_timeout() => {
            return Err(Error::timeout(started.elapsed().as_millis() as u64));
        }
        Err(err) => return Err(Error::Http(err)),
    };

    // Only 4xx/5xx reach the mapper; a residual 3xx (redirects are
    // followed automatically) is not an error.
    let status = response.status();
    if status.as_u16() < 400 {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.text().await.unwrap_or_default();
    warn!(%status, "request failed");
    Err(Error::from_response(status, retry_after.as_deref(), &body))
}
