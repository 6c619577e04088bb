//! High-level Artboard API client

use crate::resources::{
    ApiKeys, Assets, Billing, Canvas, Designs, Renders, Templates, Usage,
};
use crate::transport::{Query, Transport};
use crate::{Error, Result, RetryPolicy, retry};
use bytes::Bytes;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Default API endpoint
const DEFAULT_BASE_URL: &str = "https://api.artboard.dev/v1/";

/// Default connect timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default per-request timeout in seconds
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Asynchronous client for the Artboard design and rendering API.
///
/// Cheap to clone; all configuration is immutable after construction, so a
/// single client can serve many concurrent calls without coordination.
///
/// ```no_run
/// # async fn example() -> artboard_client::Result<()> {
/// use artboard_client::ArtboardClient;
///
/// let client = ArtboardClient::new("ak_live_...")?;
/// let design = client.designs().get("des_123").await?;
/// println!("{}", design.title);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ArtboardClient {
    transport: Transport,
    policy: RetryPolicy,
}

impl ArtboardClient {
    /// Create a client with default configuration for the given API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a builder for configuring the client
    pub fn builder() -> ArtboardClientBuilder {
        ArtboardClientBuilder::new()
    }

    /// Design CRUD and export operations
    pub fn designs(&self) -> Designs<'_> {
        Designs::new(self)
    }

    /// Template catalog and design instantiation
    pub fn templates(&self) -> Templates<'_> {
        Templates::new(self)
    }

    /// Render jobs and batches, including completion waits
    pub fn renders(&self) -> Renders<'_> {
        Renders::new(self)
    }

    /// Asset upload, listing, and download
    pub fn assets(&self) -> Assets<'_> {
        Assets::new(self)
    }

    /// Plan and invoice queries
    pub fn billing(&self) -> Billing<'_> {
        Billing::new(self)
    }

    /// Usage summaries
    pub fn usage(&self) -> Usage<'_> {
        Usage::new(self)
    }

    /// API key management
    pub fn api_keys(&self) -> ApiKeys<'_> {
        ApiKeys::new(self)
    }

    /// Canvas mutation on a design
    pub fn canvas(&self) -> Canvas<'_> {
        Canvas::new(self)
    }

    /// The retry policy applied to every request
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<Query>,
    ) -> Result<T> {
        retry::execute_with_retry(&self.policy, || {
            self.transport
                .send_json(Method::GET, path, query.as_ref(), None)
        })
        .await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T> {
        retry::execute_with_retry(&self.policy, || {
            self.transport
                .send_json(Method::POST, path, None, Some(&body))
        })
        .await
    }

    pub(crate) async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T> {
        retry::execute_with_retry(&self.policy, || {
            self.transport
                .send_json(Method::PATCH, path, None, Some(&body))
        })
        .await
    }

    pub(crate) async fn post_no_content(&self, path: &str, body: serde_json::Value) -> Result<()> {
        retry::execute_with_retry(&self.policy, || {
            self.transport
                .send_no_content(Method::POST, path, None, Some(&body))
        })
        .await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        retry::execute_with_retry(&self.policy, || {
            self.transport
                .send_no_content(Method::DELETE, path, None, None)
        })
        .await
    }

    pub(crate) async fn download(&self, path: &str) -> Result<Bytes> {
        retry::execute_with_retry(&self.policy, || {
            self.transport.send_bytes(Method::GET, path)
        })
        .await
    }

    pub(crate) async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<Query>,
        content_type: &str,
        payload: Bytes,
    ) -> Result<T> {
        retry::execute_with_retry(&self.policy, || {
            self.transport
                .send_upload(path, query.as_ref(), content_type, payload.clone())
        })
        .await
    }
}

/// Builder for [`ArtboardClient`]
#[derive(Debug, Default)]
pub struct ArtboardClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    user_agent: Option<String>,
    request_timeout: Option<Duration>,
    policy: Option<RetryPolicy>,
    http: Option<Client>,
}

impl ArtboardClientBuilder {
    /// Create a builder with no configuration set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key (required)
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the API endpoint, e.g. for a staging environment
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set a custom user agent string
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the per-request timeout (default 30s)
    pub fn request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = Some(request_timeout);
        self
    }

    /// Set the retry policy applied to every request
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Supply a preconfigured `reqwest::Client`
    pub fn http_client(mut self, http: Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the client
    ///
    /// Fails when the API key is missing, the base URL does not parse, or
    /// the underlying HTTP client cannot be constructed.
    pub fn build(self) -> Result<ArtboardClient> {
        let api_key = self
            .api_key
            .ok_or_else(|| Error::Config("API key is required".to_string()))?;

        let raw_base = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        // Url::join drops the last path segment without this
        let normalized = if raw_base.ends_with('/') {
            raw_base.clone()
        } else {
            format!("{raw_base}/")
        };
        let base_url = Url::parse(&normalized).map_err(|_| Error::invalid_url(raw_base))?;

        let http = match self.http {
            Some(http) => http,
            None => Client::builder()
                .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
                .build()?,
        };

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("artboard-rs/{}", env!("CARGO_PKG_VERSION")));

        let transport = Transport::new(
            http,
            base_url,
            api_key,
            user_agent,
            self.request_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
        );

        Ok(ArtboardClient {
            transport,
            policy: self.policy.unwrap_or_default(),
        })
    }
}
