//! Webhook signature verification for the Artboard API.
//!
//! Deliveries carry a signature header in the fixed wire format
//! `t=<unix-seconds>,v1=<hex HMAC-SHA256>`. The digest is computed over
//! `"<t>.<payload>"` with the endpoint's shared secret, and verification
//! enforces a replay-tolerance window around the timestamp.
//!
//! ```
//! use artboard_webhook::{construct_event, generate_signature};
//!
//! let payload = r#"{"id":"evt_1","type":"render.completed","timestamp":0,"data":{}}"#;
//! let signature = generate_signature(payload.as_bytes(), "whsec_test");
//! let event = construct_event(payload, &signature, "whsec_test").unwrap();
//! assert_eq!(event.event_type, "render.completed");
//! ```

pub mod event;
pub mod signature;

pub use event::{WebhookError, WebhookEvent, construct_event, construct_event_with_tolerance};
pub use signature::{
    DEFAULT_TOLERANCE_SECS, generate_signature, generate_signature_at, verify, verify_signature,
};
