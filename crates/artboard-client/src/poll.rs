//! Long-poll state machines for asynchronous render jobs and batches

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::{debug, trace};

/// Default single-job wait timeout in milliseconds
const DEFAULT_JOB_TIMEOUT_MS: u64 = 300_000;

/// Default single-job poll interval in milliseconds
const DEFAULT_JOB_POLL_INTERVAL_MS: u64 = 2_000;

/// Default batch wait timeout in milliseconds
const DEFAULT_BATCH_TIMEOUT_MS: u64 = 600_000;

/// Default batch poll interval in milliseconds
const DEFAULT_BATCH_POLL_INTERVAL_MS: u64 = 5_000;

/// Lifecycle state of a render job as reported by the status endpoint.
///
/// Only `completed` and `failed` are terminal. Any status string the client
/// does not recognize is kept verbatim in [`JobStatus::Unknown`] and treated
/// as "still waiting", so new intermediate states on the service side never
/// break an in-flight wait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    /// Queued, not yet picked up
    Pending,
    /// A render worker is producing output
    Processing,
    /// Output is ready
    Completed,
    /// The job failed; the owning record carries the reason
    Failed,
    /// Unrecognized status string, non-terminal
    Unknown(String),
}

impl From<String> for JobStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "processing" => Self::Processing,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            _ => Self::Unknown(value),
        }
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Pending => "pending".to_string(),
            JobStatus::Processing => "processing".to_string(),
            JobStatus::Completed => "completed".to_string(),
            JobStatus::Failed => "failed".to_string(),
            JobStatus::Unknown(value) => value,
        }
    }
}

impl JobStatus {
    /// Whether no further polling is meaningful
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Timeout and poll-interval configuration for a wait loop
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Wall-clock budget for the whole wait
    pub timeout: Duration,
    /// Sleep between consecutive status fetches
    pub poll_interval: Duration,
}

impl WaitOptions {
    /// Defaults for a single render job: 300s timeout, 2s poll interval
    pub fn job() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_JOB_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_JOB_POLL_INTERVAL_MS),
        }
    }

    /// Defaults for a render batch: 600s timeout, 5s poll interval
    pub fn batch() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_BATCH_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_BATCH_POLL_INTERVAL_MS),
        }
    }

    /// Set the wall-clock budget
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the sleep between status fetches
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self::job()
    }
}

/// A pollable job record: something with an id, a status, and a failure reason
pub trait JobState {
    /// Identifier used in timeout and failure errors
    fn job_id(&self) -> &str;
    /// Current lifecycle state
    fn status(&self) -> &JobStatus;
    /// Failure reason reported by the service, if any
    fn failure_reason(&self) -> Option<&str>;
}

/// A pollable batch record with a server-authoritative completion flag
pub trait BatchState {
    /// Identifier used in timeout errors
    fn batch_id(&self) -> &str;
    /// The service's aggregate completion flag
    fn all_completed(&self) -> bool;
}

/// Poll `fetch` until the job reaches a terminal state or `options.timeout`
/// elapses.
///
/// Resolves with the job record on `completed`; fails with
/// [`Error::JobFailed`] on `failed` and [`Error::WaitTimeout`] when the
/// deadline passes. The deadline is checked before every fetch, so a slow
/// status call cannot buy the loop an extra iteration once time is up.
pub async fn wait_for_completion<T, F, Fut>(mut fetch: F, options: &WaitOptions) -> Result<T>
where
    T: JobState,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let started = Instant::now();
    loop {
        let elapsed = started.elapsed();
        if elapsed >= options.timeout {
            return Err(Error::wait_timeout("job", elapsed.as_millis() as u64));
        }

        let job = fetch().await?;
        trace!(job_id = job.job_id(), status = ?job.status(), "polled job");

        match job.status() {
            JobStatus::Completed => return Ok(job),
            JobStatus::Failed => {
                let reason = job
                    .failure_reason()
                    .unwrap_or("no reason reported")
                    .to_string();
                return Err(Error::job_failed(job.job_id(), reason));
            }
            _ => {
                debug!(
                    job_id = job.job_id(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "job not terminal, polling again"
                );
            }
        }

        sleep(options.poll_interval).await;
    }
}

/// Poll `fetch` until the batch's `all_completed` flag is true or
/// `options.timeout` elapses.
///
/// Completion is server-authoritative: the loop never re-derives it by
/// counting per-job statuses, and an individual `failed` job does not
/// short-circuit the wait. Callers that care about partial failures must
/// inspect the per-job statuses on the resolved record.
pub async fn wait_for_batch<T, F, Fut>(mut fetch: F, options: &WaitOptions) -> Result<T>
where
    T: BatchState,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let started = Instant::now();
    loop {
        let elapsed = started.elapsed();
        if elapsed >= options.timeout {
            return Err(Error::wait_timeout("batch", elapsed.as_millis() as u64));
        }

        let batch = fetch().await?;
        if batch.all_completed() {
            return Ok(batch);
        }
        debug!(
            batch_id = batch.batch_id(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "batch not complete, polling again"
        );

        sleep(options.poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_known_strings() {
        assert_eq!(JobStatus::from("pending".to_string()), JobStatus::Pending);
        assert_eq!(
            JobStatus::from("processing".to_string()),
            JobStatus::Processing
        );
        assert_eq!(
            JobStatus::from("completed".to_string()),
            JobStatus::Completed
        );
        assert_eq!(JobStatus::from("failed".to_string()), JobStatus::Failed);
    }

    #[test]
    fn unknown_status_is_kept_verbatim_and_non_terminal() {
        let status = JobStatus::from("rendering_preview".to_string());
        assert_eq!(status, JobStatus::Unknown("rendering_preview".to_string()));
        assert!(!status.is_terminal());
    }

    #[test]
    fn terminal_detection_requires_exact_match() {
        // Casing and whitespace variants are unknown, not terminal
        assert!(!JobStatus::from("Completed".to_string()).is_terminal());
        assert!(!JobStatus::from("FAILED".to_string()).is_terminal());
        assert!(!JobStatus::from("completed ".to_string()).is_terminal());
        assert!(JobStatus::from("completed".to_string()).is_terminal());
        assert!(JobStatus::from("failed".to_string()).is_terminal());
    }

    #[test]
    fn status_round_trips_through_string() {
        for raw in ["pending", "processing", "completed", "failed", "exporting"] {
            let status = JobStatus::from(raw.to_string());
            assert_eq!(String::from(status), raw);
        }
    }

    #[test]
    fn wait_defaults_match_documented_values() {
        let job = WaitOptions::job();
        assert_eq!(job.timeout, Duration::from_secs(300));
        assert_eq!(job.poll_interval, Duration::from_secs(2));

        let batch = WaitOptions::batch();
        assert_eq!(batch.timeout, Duration::from_secs(600));
        assert_eq!(batch.poll_interval, Duration::from_secs(5));
    }
}
