//! Unverified token inspection.
//!
//! Tokens are decoded by reading the base64url JSON payload segment. The
//! signature is never checked here; the backend validates on every request.
//! Anything that fails to decode is reported as `None`, which every caller
//! treats as an expired token.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use hire_core::TokenClaims;

/// A token this close to `exp` is already treated as expired.
pub const EXPIRY_BUFFER_SECS: i64 = 30;

/// A token with less validity than this left is refreshed before its next use.
pub const REFRESH_WINDOW_SECS: i64 = 300;

/// Backends differ on whether they pad the payload segment.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode the claims of a `header.payload.signature` token.
///
/// Returns `None` unless the token has exactly three non-empty segments and
/// the middle one is base64url-encoded JSON matching [`TokenClaims`].
#[must_use]
pub fn decode(token: &str) -> Option<TokenClaims> {
    let mut segments = token.split('.');
    let (Some(header), Some(payload), Some(signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        tracing::debug!("token does not have three segments");
        return None;
    };
    if header.is_empty() || payload.is_empty() || signature.is_empty() {
        tracing::debug!("token has an empty segment");
        return None;
    }

    let bytes = PAYLOAD_ENGINE
        .decode(payload)
        .inspect_err(|error| tracing::debug!(%error, "token payload is not base64url"))
        .ok()?;
    serde_json::from_slice(&bytes)
        .inspect_err(|error| tracing::debug!(%error, "token payload is not claims JSON"))
        .ok()
}

/// Current Unix time in seconds.
#[must_use]
pub fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

/// `true` if the token is undecodable or expires within [`EXPIRY_BUFFER_SECS`].
#[must_use]
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, now_secs())
}

/// [`is_expired`] against an explicit clock.
#[must_use]
pub fn is_expired_at(token: &str, now: i64) -> bool {
    decode(token).is_none_or(|claims| claims.expires_at < now + EXPIRY_BUFFER_SECS)
}

/// `true` if the token is undecodable or has less than [`REFRESH_WINDOW_SECS`] left.
#[must_use]
pub fn needs_refresh(token: &str) -> bool {
    needs_refresh_at(token, now_secs())
}

/// [`needs_refresh`] against an explicit clock.
#[must_use]
pub fn needs_refresh_at(token: &str, now: i64) -> bool {
    decode(token).is_none_or(|claims| claims.remaining_secs(now) < REFRESH_WINDOW_SECS)
}
