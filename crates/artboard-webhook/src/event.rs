//! Verified webhook event construction

use crate::signature::{DEFAULT_TOLERANCE_SECS, verify_signature};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while constructing a verified event.
///
/// Note the asymmetry with [`crate::verify_signature`]: verification is a
/// boolean predicate that never errors, while event construction is a
/// convenience that fails loudly.
#[derive(Error, Debug)]
pub enum WebhookError {
    /// The signature header did not verify against the payload
    #[error("webhook signature verification failed")]
    InvalidSignature,

    /// The payload is not a well-formed event document
    #[error("invalid webhook payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

/// A webhook delivery, available only after its signature verified
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    /// Unique identifier, `evt_` prefixed
    pub id: String,
    /// Event name, e.g. "render.completed"
    #[serde(rename = "type")]
    pub event_type: String,
    /// When the service emitted the event, unix seconds
    pub timestamp: i64,
    /// Event-specific payload
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

/// Verify the signature and parse the payload into a [`WebhookEvent`],
/// using the default tolerance window.
pub fn construct_event(
    payload: &str,
    signature: &str,
    secret: &str,
) -> Result<WebhookEvent, WebhookError> {
    construct_event_with_tolerance(payload, signature, secret, DEFAULT_TOLERANCE_SECS)
}

/// Verify the signature with an explicit tolerance window, then parse.
///
/// Fails with [`WebhookError::InvalidSignature`] before the payload is ever
/// parsed, so unverified input never reaches the JSON decoder.
pub fn construct_event_with_tolerance(
    payload: &str,
    signature: &str,
    secret: &str,
    tolerance_secs: u64,
) -> Result<WebhookEvent, WebhookError> {
    if !verify_signature(payload.as_bytes(), signature, secret, tolerance_secs) {
        return Err(WebhookError::InvalidSignature);
    }
    Ok(serde_json::from_str(payload)?)
}
