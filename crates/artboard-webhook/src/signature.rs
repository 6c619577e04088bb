//! HMAC-SHA256 webhook signatures
//!
//! Wire format of the signature header, fixed for interoperability:
//! comma-separated `key=value` pairs with keys `t` (unix seconds, raw
//! digits) and `v1` (lowercase hex HMAC-SHA256 digest). The signed input is
//! `"<t>.<payload>"`, which binds the digest to the timestamp so a captured
//! signature cannot be replayed outside the tolerance window.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

/// Default replay/clock-skew tolerance in seconds
pub const DEFAULT_TOLERANCE_SECS: u64 = 300;

/// Parsed form of a well-formed signature header
struct ParsedSignature {
    timestamp: i64,
    digest: Vec<u8>,
}

/// Verify a webhook signature with the default tolerance window.
///
/// See [`verify_signature`].
pub fn verify(payload: &[u8], signature: &str, secret: &str) -> bool {
    verify_signature(payload, signature, secret, DEFAULT_TOLERANCE_SECS)
}

/// Verify a webhook signature against the payload and shared secret.
///
/// Returns `false` (fails closed) when the header is malformed, the
/// timestamp is older or newer than `tolerance_secs`, or the digest does not
/// match. The digest comparison is constant-time regardless of where or
/// whether the candidate differs, including on length mismatch. Never
/// panics or errors; this is a predicate meant for security-sensitive
/// branching.
pub fn verify_signature(
    payload: &[u8],
    signature: &str,
    secret: &str,
    tolerance_secs: u64,
) -> bool {
    let Some(parsed) = parse_signature_header(signature) else {
        return false;
    };

    if unix_now().abs_diff(parsed.timestamp) > tolerance_secs {
        return false;
    }

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(parsed.timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);

    // Constant-time comparison; rejects wrong-length digests on the same path
    mac.verify_slice(&parsed.digest).is_ok()
}

/// Sign a payload with the current time, producing a `t=<ts>,v1=<hex>`
/// header value that [`verify_signature`] accepts.
///
/// Intended for tests and for operators simulating deliveries.
pub fn generate_signature(payload: &[u8], secret: &str) -> String {
    generate_signature_at(payload, secret, unix_now())
}

/// Sign a payload for an explicit unix timestamp.
///
/// Useful for replaying historical deliveries or constructing fixtures; a
/// signature generated outside the verifier's tolerance window will not
/// verify even though its digest is internally consistent.
pub fn generate_signature_at(payload: &[u8], secret: &str, timestamp: i64) -> String {
    let digest = compute_digest(payload, secret, timestamp);
    format!("t={timestamp},v1={}", hex::encode(digest))
}

#[allow(clippy::expect_used)]
fn compute_digest(payload: &[u8], secret: &str, timestamp: i64) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Split the header into `key=value` pairs and extract `t` and `v1`.
///
/// Pair order is irrelevant; both keys are required. Returns `None` on any
/// malformed input.
fn parse_signature_header(signature: &str) -> Option<ParsedSignature> {
    let mut timestamp = None;
    let mut digest = None;

    for pair in signature.split(',') {
        let (key, value) = pair.split_once('=')?;
        match key.trim() {
            "t" => timestamp = Some(value.trim().parse::<i64>().ok()?),
            "v1" => digest = Some(hex::decode(value.trim()).ok()?),
            // Unknown keys are ignored for forward compatibility
            _ => {}
        }
    }

    Some(ParsedSignature {
        timestamp: timestamp?,
        digest: digest?,
    })
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
