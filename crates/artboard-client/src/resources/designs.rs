//! Design resource: CRUD and export

use crate::pagination::{ListParams, Page};
use crate::resources::renders::{RenderFormat, RenderJob};
use crate::{ArtboardClient, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A design document
#[derive(Debug, Clone, Deserialize)]
pub struct Design {
    /// Unique identifier, `des_` prefixed
    pub id: String,
    /// Display title
    pub title: String,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Template this design was instantiated from, if any
    #[serde(default)]
    pub template_id: Option<String>,
    /// Preview thumbnail, present once the service has rendered one
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Creation timestamp, RFC 3339
    pub created_at: String,
    /// Last modification timestamp, RFC 3339
    pub updated_at: String,
}

/// Parameters for creating a design
#[derive(Debug, Clone, Serialize)]
pub struct CreateDesign {
    title: String,
    width: u32,
    height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    template_id: Option<String>,
}

impl CreateDesign {
    /// A blank design with the given title and canvas size
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            template_id: None,
        }
    }

    /// Start from a template instead of a blank canvas
    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }
}

/// Design operations, obtained from [`ArtboardClient::designs`]
#[derive(Debug)]
pub struct Designs<'a> {
    client: &'a ArtboardClient,
}

impl<'a> Designs<'a> {
    pub(crate) fn new(client: &'a ArtboardClient) -> Self {
        Self { client }
    }

    /// Create a design
    pub async fn create(&self, request: &CreateDesign) -> Result<Design> {
        self.client
            .post("designs", serde_json::to_value(request)?)
            .await
    }

    /// Fetch a design by id
    pub async fn get(&self, design_id: &str) -> Result<Design> {
        self.client
            .get(&format!("designs/{design_id}"), None)
            .await
    }

    /// List designs, newest first
    pub async fn list(&self, params: &ListParams) -> Result<Page<Design>> {
        self.client.get("designs", Some(params.to_query())).await
    }

    /// Rename a design
    pub async fn rename(&self, design_id: &str, title: &str) -> Result<Design> {
        self.client
            .patch(&format!("designs/{design_id}"), json!({ "title": title }))
            .await
    }

    /// Delete a design permanently
    pub async fn delete(&self, design_id: &str) -> Result<()> {
        self.client.delete(&format!("designs/{design_id}")).await
    }

    /// Start an export render for the design.
    ///
    /// Returns the queued job; pair with [`crate::resources::Renders::wait`]
    /// to block until the output is ready.
    pub async fn export(&self, design_id: &str, format: RenderFormat) -> Result<RenderJob> {
        self.client
            .post(
                &format!("designs/{design_id}/export"),
                json!({ "format": format }),
            )
            .await
    }
}
