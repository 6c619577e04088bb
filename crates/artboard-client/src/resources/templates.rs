//! Template catalog and design instantiation

use crate::pagination::{ListParams, Page};
use crate::resources::designs::Design;
use crate::{ArtboardClient, Result};
use serde::Deserialize;
use serde_json::json;

/// A reusable design template
#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    /// Unique identifier, `tpl_` prefixed
    pub id: String,
    /// Display name
    pub name: String,
    /// Search tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Preview image URL
    #[serde(default)]
    pub preview_url: Option<String>,
    /// Names of the merge fields the template accepts
    #[serde(default)]
    pub merge_fields: Vec<String>,
}

/// Template operations, obtained from [`ArtboardClient::templates`]
#[derive(Debug)]
pub struct Templates<'a> {
    client: &'a ArtboardClient,
}

impl<'a> Templates<'a> {
    pub(crate) fn new(client: &'a ArtboardClient) -> Self {
        Self { client }
    }

    /// List available templates
    pub async fn list(&self, params: &ListParams) -> Result<Page<Template>> {
        self.client.get("templates", Some(params.to_query())).await
    }

    /// Fetch a template by id
    pub async fn get(&self, template_id: &str) -> Result<Template> {
        self.client
            .get(&format!("templates/{template_id}"), None)
            .await
    }

    /// Instantiate a design from a template, filling its merge fields.
    ///
    /// Unknown merge-field names are rejected by the service with a
    /// validation error.
    pub async fn create_design(
        &self,
        template_id: &str,
        title: &str,
        merge: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Design> {
        self.client
            .post(
                &format!("templates/{template_id}/designs"),
                json!({ "title": title, "merge": merge }),
            )
            .await
    }
}
