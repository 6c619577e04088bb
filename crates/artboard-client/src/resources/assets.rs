//! Asset upload, listing, and download

use crate::pagination::{ListParams, Page};
use crate::{ArtboardClient, Result};
use bytes::Bytes;
use serde::Deserialize;

/// An uploaded media asset
#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    /// Unique identifier, `ast_` prefixed
    pub id: String,
    /// Original filename as supplied at upload
    pub filename: String,
    /// MIME type
    pub content_type: String,
    /// Stored size in bytes
    pub size_bytes: u64,
    /// Public URL, present for assets served from the CDN
    #[serde(default)]
    pub url: Option<String>,
    /// Upload timestamp, RFC 3339
    pub created_at: String,
}

/// Asset operations, obtained from [`ArtboardClient::assets`]
#[derive(Debug)]
pub struct Assets<'a> {
    client: &'a ArtboardClient,
}

impl<'a> Assets<'a> {
    pub(crate) fn new(client: &'a ArtboardClient) -> Self {
        Self { client }
    }

    /// Upload a binary payload as a new asset
    pub async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        payload: Bytes,
    ) -> Result<Asset> {
        let query = vec![("filename".to_string(), filename.to_string())];
        self.client
            .upload("assets", Some(query), content_type, payload)
            .await
    }

    /// Fetch asset metadata by id
    pub async fn get(&self, asset_id: &str) -> Result<Asset> {
        self.client.get(&format!("assets/{asset_id}"), None).await
    }

    /// List assets, newest first
    pub async fn list(&self, params: &ListParams) -> Result<Page<Asset>> {
        self.client.get("assets", Some(params.to_query())).await
    }

    /// Delete an asset permanently
    pub async fn delete(&self, asset_id: &str) -> Result<()> {
        self.client.delete(&format!("assets/{asset_id}")).await
    }

    /// Download the asset's binary content
    pub async fn download(&self, asset_id: &str) -> Result<Bytes> {
        self.client
            .download(&format!("assets/{asset_id}/download"))
            .await
    }
}
