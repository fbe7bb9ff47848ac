//! Slack request signing (`X-Slack-Signature`, version `v0`).

use hmac::{Hmac, Mac};
use sha2::Sha256;

use lpb_core::{errors::Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// Requests older (or newer) than this are rejected as possible replays.
pub const MAX_SKEW_SECS: i64 = 60 * 5;

fn mac(secret: &str, timestamp: &str, body: &[u8]) -> Result<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| Error::Signature(format!("bad signing secret: {e}")))?;
    mac.update(b"v0:");
    mac.update(timestamp.as_bytes());
    mac.update(b":");
    mac.update(body);
    Ok(mac)
}

/// Compute the `v0=<hex>` signature Slack would send for this request.
pub fn sign(secret: &str, timestamp: &str, body: &[u8]) -> Result<String> {
    let digest = mac(secret, timestamp, body)?.finalize().into_bytes();
    Ok(format!("v0={}", hex::encode(digest)))
}

/// Check a request's signature and timestamp against the signing secret.
///
/// `now` is the current unix time in seconds.
pub fn verify(
    secret: &str,
    timestamp: &str,
    body: &[u8],
    signature: &str,
    now: i64,
) -> Result<()> {
    let ts: i64 = timestamp
        .trim()
        .parse()
        .map_err(|_| Error::Signature(format!("invalid timestamp: {timestamp:?}")))?;
    if now.abs_diff(ts) > MAX_SKEW_SECS.unsigned_abs() {
        return Err(Error::Signature("stale request timestamp".to_string()));
    }

    let hex_sig = signature
        .strip_prefix("v0=")
        .ok_or_else(|| Error::Signature("unsupported signature version".to_string()))?;
    let expected =
        hex::decode(hex_sig).map_err(|_| Error::Signature("signature is not hex".to_string()))?;

    mac(secret, timestamp, body)?
        .verify_slice(&expected)
        .map_err(|_| Error::Signature("signature mismatch".to_string()))
}
