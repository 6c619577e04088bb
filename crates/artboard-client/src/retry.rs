//! Retry engine with exponential backoff for transient API failures

use crate::{Error, ErrorKind, Result};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Default maximum attempts (first try included)
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default initial backoff in milliseconds
const DEFAULT_INITIAL_DELAY_MS: u64 = 1_000;

/// Default maximum backoff in milliseconds
const DEFAULT_MAX_DELAY_MS: u64 = 60_000;

/// Default backoff multiplier
const DEFAULT_BACKOFF_FACTOR: f64 = 2.0;

/// Retry configuration for API operations.
///
/// Immutable once constructed; safe to share across concurrent calls. The
/// default policy retries rate-limit and server errors only, with three
/// attempts and a geometric backoff of 1s, 2s, 4s, ... capped at 60s.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_factor: f64,
    initial_delay: Duration,
    max_delay: Duration,
    retryable: Vec<ErrorKind>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_factor: DEFAULT_BACKOFF_FACTOR,
            initial_delay: Duration::from_millis(DEFAULT_INITIAL_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
            retryable: vec![ErrorKind::RateLimit, ErrorKind::Server],
        }
    }
}

impl RetryPolicy {
    /// Create the default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// A policy that never retries, for callers that need fail-fast behavior
    pub fn none() -> Self {
        Self::default().with_max_attempts(1).with_retryable(&[])
    }

    /// Set the maximum number of attempts (minimum 1, the initial try)
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Set the backoff multiplier applied after each failed attempt
    ///
    /// Values below 1.0 are clamped to 1.0 so the delay never shrinks.
    pub fn with_backoff_factor(mut self, backoff_factor: f64) -> Self {
        self.backoff_factor = if backoff_factor >= 1.0 {
            backoff_factor
        } else {
            1.0
        };
        self
    }

    /// Set the delay before the first retry
    pub fn with_initial_delay(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        if self.max_delay < self.initial_delay {
            self.max_delay = self.initial_delay;
        }
        self
    }

    /// Set the backoff cap
    ///
    /// Clamped up to the initial delay so the cap never undercuts it.
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay.max(self.initial_delay);
        self
    }

    /// Set which error kinds are retried
    pub fn with_retryable(mut self, kinds: &[ErrorKind]) -> Self {
        self.retryable = kinds.to_vec();
        self
    }

    /// Whether an error of the given kind should be retried
    pub fn is_retryable(&self, kind: ErrorKind) -> bool {
        self.retryable.contains(&kind)
    }

    /// Maximum number of attempts
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

/// Invoke `op` until it succeeds, exhausts the policy's attempts, or fails
/// with a non-retryable error.
///
/// The wait before each retry is the server's `Retry-After` hint when the
/// failure is a rate limit that carries one, otherwise the current geometric
/// backoff delay. The backoff delay advances after every sleep, hinted or
/// not, but a hint is used verbatim and never overwrites it. With the
/// defaults, a hinted 5s wait on the first failure is followed by a 2000ms
/// backoff wait on the second, not 1000ms.
///
/// When attempts run out the last underlying error is returned unchanged;
/// there is no synthetic "retries exhausted" wrapper.
pub async fn execute_with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt: u32 = 0;
    let mut delay = policy.initial_delay;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempt += 1;
                if !policy.is_retryable(err.kind()) || attempt >= policy.max_attempts {
                    return Err(err);
                }

                let wait = match &err {
                    Error::RateLimit {
                        retry_after_secs: Some(secs),
                        ..
                    } => {
                        warn!(
                            retry_after_secs = secs,
                            attempt, "rate limited, honoring server hint"
                        );
                        Duration::from_secs(*secs)
                    }
                    _ => {
                        debug!(
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            error = %err,
                            "retrying after backoff"
                        );
                        delay
                    }
                };

                sleep(wait).await;
                delay = delay.mul_f64(policy.backoff_factor).min(policy.max_delay);
            }
        }
    }
}
