//! Render jobs and batches

use crate::poll::{self, BatchState, JobState, JobStatus, WaitOptions};
use crate::{ArtboardClient, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Output format for a render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// Lossless raster output
    Png,
    /// Lossy raster output
    Jpeg,
    /// Multi-page document output
    Pdf,
    /// Animated designs only
    Mp4,
}

/// An asynchronous render job tracked by the status endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RenderJob {
    /// Unique identifier, `job_` prefixed
    pub id: String,
    /// Design being rendered
    #[serde(default)]
    pub design_id: Option<String>,
    /// Current lifecycle state
    pub status: JobStatus,
    /// Download URL for the output, present once `status` is completed
    #[serde(default)]
    pub output_url: Option<String>,
    /// Failure reason, present once `status` is failed
    #[serde(default)]
    pub error: Option<String>,
    /// Creation timestamp, RFC 3339
    #[serde(default)]
    pub created_at: Option<String>,
}

impl JobState for RenderJob {
    fn job_id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> &JobStatus {
        &self.status
    }

    fn failure_reason(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Parameters for creating a render job
#[derive(Debug, Clone, Serialize)]
pub struct RenderRequest {
    design_id: String,
    format: RenderFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pages: Option<Vec<u32>>,
}

impl RenderRequest {
    /// Render the whole design at native scale
    pub fn new(design_id: impl Into<String>, format: RenderFormat) -> Self {
        Self {
            design_id: design_id.into(),
            format,
            scale: None,
            pages: None,
        }
    }

    /// Scale the output, e.g. 2.0 for a retina export
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Restrict the render to the given pages (1-based)
    pub fn with_pages(mut self, pages: Vec<u32>) -> Self {
        self.pages = Some(pages);
        self
    }
}

/// Per-job entry inside a batch status response
#[derive(Debug, Clone, Deserialize)]
pub struct BatchJob {
    /// Identifier of the member job
    pub job_id: String,
    /// Lifecycle state of the member job
    pub status: JobStatus,
    /// Output URL, present once the member job completed
    #[serde(default)]
    pub output_url: Option<String>,
    /// Failure reason, present once the member job failed
    #[serde(default)]
    pub error: Option<String>,
}

/// A named group of render jobs with an aggregate completion flag.
///
/// `all_completed` is owned by the service and is the only terminal signal a
/// batch wait acts on; the client never re-derives it from member statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderBatch {
    /// Unique identifier, `batch_` prefixed
    pub id: String,
    /// Member jobs, in submission order
    pub jobs: Vec<BatchJob>,
    /// Server-authoritative aggregate completion flag
    pub all_completed: bool,
}

impl BatchState for RenderBatch {
    fn batch_id(&self) -> &str {
        &self.id
    }

    fn all_completed(&self) -> bool {
        self.all_completed
    }
}

/// Render operations, obtained from [`ArtboardClient::renders`]
#[derive(Debug)]
pub struct Renders<'a> {
    client: &'a ArtboardClient,
}

impl<'a> Renders<'a> {
    pub(crate) fn new(client: &'a ArtboardClient) -> Self {
        Self { client }
    }

    /// Queue a render job
    pub async fn create(&self, request: &RenderRequest) -> Result<RenderJob> {
        self.client
            .post("renders", serde_json::to_value(request)?)
            .await
    }

    /// Fetch the current state of a render job
    pub async fn get(&self, job_id: &str) -> Result<RenderJob> {
        self.client.get(&format!("renders/{job_id}"), None).await
    }

    /// Poll a job until it completes, fails, or the wait times out.
    ///
    /// Resolves with the completed job record. See
    /// [`poll::wait_for_completion`] for the exact loop semantics.
    pub async fn wait(&self, job_id: &str, options: &WaitOptions) -> Result<RenderJob> {
        poll::wait_for_completion(|| self.get(job_id), options).await
    }

    /// Queue a batch of render jobs
    pub async fn create_batch(&self, requests: &[RenderRequest]) -> Result<RenderBatch> {
        self.client
            .post("renders/batches", json!({ "jobs": requests }))
            .await
    }

    /// Fetch the current state of a batch
    pub async fn get_batch(&self, batch_id: &str) -> Result<RenderBatch> {
        self.client
            .get(&format!("renders/batches/{batch_id}"), None)
            .await
    }

    /// Poll a batch until the service reports it complete or the wait times
    /// out, resolving with the per-job statuses in submission order.
    ///
    /// A member job reporting `failed` does not end the wait; only the
    /// service's `all_completed` flag does. Inspect the returned statuses for
    /// partial failures.
    pub async fn wait_batch(
        &self,
        batch_id: &str,
        options: &WaitOptions,
    ) -> Result<Vec<BatchJob>> {
        let batch = poll::wait_for_batch(|| self.get_batch(batch_id), options).await?;
        Ok(batch.jobs)
    }
}
