//! API key management

use crate::pagination::{ListParams, Page};
use crate::{ArtboardClient, Result};
use serde::Deserialize;
use serde_json::json;

/// An API key's metadata; the secret itself is only returned at creation
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKey {
    /// Unique identifier, `key_` prefixed
    pub id: String,
    /// Display name
    pub name: String,
    /// First characters of the secret, for identification in dashboards
    pub prefix: String,
    /// Scopes granted to the key, e.g. "designs:write"
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Creation timestamp, RFC 3339
    pub created_at: String,
    /// Last authenticated use, RFC 3339
    #[serde(default)]
    pub last_used_at: Option<String>,
}

/// Creation response carrying the one-time secret
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedApiKey {
    /// The full secret; shown once, store it now
    pub secret: String,
    /// Metadata for the new key
    #[serde(flatten)]
    pub key: ApiKey,
}

/// API key operations, obtained from [`ArtboardClient::api_keys`]
#[derive(Debug)]
pub struct ApiKeys<'a> {
    client: &'a ArtboardClient,
}

impl<'a> ApiKeys<'a> {
    pub(crate) fn new(client: &'a ArtboardClient) -> Self {
        Self { client }
    }

    /// List keys for the workspace
    pub async fn list(&self, params: &ListParams) -> Result<Page<ApiKey>> {
        self.client.get("api-keys", Some(params.to_query())).await
    }

    /// Create a key with the given scopes
    pub async fn create(&self, name: &str, scopes: &[&str]) -> Result<CreatedApiKey> {
        self.client
            .post("api-keys", json!({ "name": name, "scopes": scopes }))
            .await
    }

    /// Revoke a key immediately
    pub async fn revoke(&self, key_id: &str) -> Result<()> {
        self.client.delete(&format!("api-keys/{key_id}")).await
    }
}
