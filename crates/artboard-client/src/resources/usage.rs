//! Usage summaries

use crate::{ArtboardClient, Result};
use serde::Deserialize;

/// Aggregated usage over a reporting period
#[derive(Debug, Clone, Deserialize)]
pub struct UsageSummary {
    /// Period start, RFC 3339
    pub period_start: String,
    /// Period end, RFC 3339
    pub period_end: String,
    /// Render jobs completed in the period
    pub renders: u64,
    /// API requests made in the period
    pub api_requests: u64,
    /// Asset storage at period end, in bytes
    pub storage_bytes: u64,
}

/// Usage operations, obtained from [`ArtboardClient::usage`]
#[derive(Debug)]
pub struct Usage<'a> {
    client: &'a ArtboardClient,
}

impl<'a> Usage<'a> {
    pub(crate) fn new(client: &'a ArtboardClient) -> Self {
        Self { client }
    }

    /// Usage for the current billing period
    pub async fn current(&self) -> Result<UsageSummary> {
        self.client.get("usage", None).await
    }

    /// Usage for an explicit period, bounds in RFC 3339
    pub async fn for_period(&self, from: &str, to: &str) -> Result<UsageSummary> {
        let query = vec![
            ("from".to_string(), from.to_string()),
            ("to".to_string(), to.to_string()),
        ];
        self.client.get("usage", Some(query)).await
    }
}
