//! Error types for the Artboard API client

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Error types for Artboard API operations
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The request was rejected with a status the API does not document
    #[error("{message}")]
    Api {
        /// Human-readable message from the error body
        message: String,
        /// HTTP status code of the response
        status: u16,
        /// Raw response body, if one was received
        body: Option<String>,
    },

    /// Missing or invalid credentials (HTTP 401, or 403 without a scope hint)
    #[error("authentication failed: {message}")]
    Authentication {
        /// Human-readable message from the error body
        message: String,
        /// HTTP status code of the response
        status: u16,
        /// Raw response body, if one was received
        body: Option<String>,
    },

    /// The API key lacks a scope required by the endpoint (HTTP 403)
    #[error("insufficient scope: {message}")]
    InsufficientScope {
        /// Human-readable message from the error body
        message: String,
        /// HTTP status code of the response
        status: u16,
        /// Raw response body, if one was received
        body: Option<String>,
    },

    /// The request body failed server-side validation (HTTP 422)
    #[error("validation failed: {message}")]
    Validation {
        /// Human-readable message from the error body
        message: String,
        /// HTTP status code of the response
        status: u16,
        /// Raw response body, if one was received
        body: Option<String>,
    },

    /// The requested resource does not exist (HTTP 404)
    #[error("not found: {message}")]
    NotFound {
        /// Human-readable message from the error body
        message: String,
        /// HTTP status code of the response
        status: u16,
        /// Raw response body, if one was received
        body: Option<String>,
    },

    /// Rate limit exceeded (HTTP 429)
    #[error("rate limited: {message}")]
    RateLimit {
        /// Human-readable message from the error body
        message: String,
        /// Seconds to wait before retrying, from the `Retry-After` header
        retry_after_secs: Option<u64>,
        /// HTTP status code of the response
        status: u16,
        /// Raw response body, if one was received
        body: Option<String>,
    },

    /// The service failed to process the request (HTTP 5xx)
    #[error("server error: {message}")]
    Server {
        /// Human-readable message from the error body
        message: String,
        /// HTTP status code of the response
        status: u16,
        /// Raw response body, if one was received
        body: Option<String>,
    },

    /// The request was aborted before a response arrived
    #[error("request timed out after {elapsed_ms}ms")]
    Timeout {
        /// Time spent waiting, in milliseconds
        elapsed_ms: u64,
    },

    /// A wait loop gave up before the job or batch reached a terminal state
    #[error("timed out waiting for {resource} after {elapsed_ms}ms")]
    WaitTimeout {
        /// What was being waited on (job or batch id)
        resource: String,
        /// Time spent waiting, in milliseconds
        elapsed_ms: u64,
    },

    /// A render job reached the `failed` state
    #[error("render job {job_id} failed: {reason}")]
    JobFailed {
        /// Identifier of the failed job
        job_id: String,
        /// Failure reason reported by the service
        reason: String,
    },

    /// Response body could not be decoded
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid base URL
    #[error("invalid base URL: {url}")]
    InvalidUrl {
        /// The URL that failed to parse
        url: String,
    },

    /// Client-side configuration problem detected before any request was made
    #[error("configuration error: {0}")]
    Config(String),
}

/// Classification tag for an [`Error`], used by the retry engine.
///
/// The taxonomy is closed: every error maps to exactly one kind, and retry
/// policies match kinds rather than inspecting error values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Undocumented 4xx status or local decode failure
    Generic,
    /// HTTP 401, or 403 without a scope hint
    Authentication,
    /// HTTP 422
    Validation,
    /// HTTP 404
    NotFound,
    /// HTTP 429
    RateLimit,
    /// HTTP 5xx
    Server,
    /// HTTP 403 with a scope hint in the message
    InsufficientScope,
    /// Request or wait deadline exceeded
    Timeout,
    /// Network-level failure with no HTTP response
    Transport,
}

/// Best-effort shape of an Artboard error body
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl Error {
    /// Classify an HTTP error response into exactly one error variant.
    ///
    /// `retry_after` is the raw `Retry-After` header value, if present; it is
    /// only consulted for 429 responses and yields `None` when unparsable.
    /// Must only be called for statuses >= 400 — success responses are never
    /// mapped.
    pub fn from_response(status: StatusCode, retry_after: Option<&str>, body: &str) -> Self {
        let message = parse_error_message(status, body);
        let code = status.as_u16();
        let raw = if body.is_empty() {
            None
        } else {
            Some(body.to_string())
        };

        match code {
            401 => Self::Authentication {
                message,
                status: code,
                body: raw,
            },
            403 => {
                if message.to_lowercase().contains("scope") {
                    Self::InsufficientScope {
                        message,
                        status: code,
                        body: raw,
                    }
                } else {
                    Self::Authentication {
                        message,
                        status: code,
                        body: raw,
                    }
                }
            }
            404 => Self::NotFound {
                message,
                status: code,
                body: raw,
            },
            422 => Self::Validation {
                message,
                status: code,
                body: raw,
            },
            429 => Self::RateLimit {
                message,
                retry_after_secs: retry_after.and_then(|v| v.trim().parse::<u64>().ok()),
                status: code,
                body: raw,
            },
            500.. => Self::Server {
                message,
                status: code,
                body: raw,
            },
            _ => Self::Api {
                message,
                status: code,
                body: raw,
            },
        }
    }

    /// The classification tag for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(_) => ErrorKind::Transport,
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::InsufficientScope { .. } => ErrorKind::InsufficientScope,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::RateLimit { .. } => ErrorKind::RateLimit,
            Self::Server { .. } => ErrorKind::Server,
            Self::Timeout { .. } | Self::WaitTimeout { .. } => ErrorKind::Timeout,
            Self::Api { .. }
            | Self::JobFailed { .. }
            | Self::Json(_)
            | Self::InvalidUrl { .. }
            | Self::Config(_) => ErrorKind::Generic,
        }
    }

    /// HTTP status code of the response this error was mapped from, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. }
            | Self::Authentication { status, .. }
            | Self::InsufficientScope { status, .. }
            | Self::Validation { status, .. }
            | Self::NotFound { status, .. }
            | Self::RateLimit { status, .. }
            | Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Create a request timeout error
    pub fn timeout(elapsed_ms: u64) -> Self {
        Self::Timeout { elapsed_ms }
    }

    /// Create a wait-loop timeout error
    pub fn wait_timeout(resource: impl Into<String>, elapsed_ms: u64) -> Self {
        Self::WaitTimeout {
            resource: resource.into(),
            elapsed_ms,
        }
    }

    /// Create a failed-job error
    pub fn job_failed(job_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::JobFailed {
            job_id: job_id.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }
}

/// Extract the human message from an error body, falling back to
/// `"HTTP <status>"` when the body is missing or unparsable.
fn parse_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.message))
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

/// Result type for Artboard API operations
pub type Result<T> = std::result::Result<T, Error>;
