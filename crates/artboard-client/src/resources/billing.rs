//! Billing plan and invoice queries

use crate::pagination::{ListParams, Page};
use crate::{ArtboardClient, Result};
use serde::Deserialize;

/// The workspace's current subscription plan
#[derive(Debug, Clone, Deserialize)]
pub struct Plan {
    /// Plan name, e.g. "starter" or "studio"
    pub name: String,
    /// Monthly render quota
    pub renders_per_month: u64,
    /// Price per billing period, in minor currency units
    pub price_cents: u64,
    /// ISO 4217 currency code
    pub currency: String,
    /// Next renewal timestamp, RFC 3339; absent for free plans
    #[serde(default)]
    pub renews_at: Option<String>,
}

/// A past or pending invoice
#[derive(Debug, Clone, Deserialize)]
pub struct Invoice {
    /// Unique identifier, `inv_` prefixed
    pub id: String,
    /// Total in minor currency units
    pub amount_cents: u64,
    /// ISO 4217 currency code
    pub currency: String,
    /// Payment status: "paid", "open", or "void"
    pub status: String,
    /// Issue timestamp, RFC 3339
    pub issued_at: String,
}

/// Billing operations, obtained from [`ArtboardClient::billing`]
#[derive(Debug)]
pub struct Billing<'a> {
    client: &'a ArtboardClient,
}

impl<'a> Billing<'a> {
    pub(crate) fn new(client: &'a ArtboardClient) -> Self {
        Self { client }
    }

    /// Fetch the current plan
    pub async fn plan(&self) -> Result<Plan> {
        self.client.get("billing/plan", None).await
    }

    /// List invoices, newest first
    pub async fn invoices(&self, params: &ListParams) -> Result<Page<Invoice>> {
        self.client
            .get("billing/invoices", Some(params.to_query()))
            .await
    }
}
