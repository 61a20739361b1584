//! Per-request correlation ids.

use std::sync::atomic::{AtomicU64, Ordering};

/// Header carrying the correlation id on every outbound request.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Fresh 128-bit hex correlation id.
#[must_use]
pub fn generate() -> String {
    let mut bytes = [0u8; 16];
    match getrandom::fill(&mut bytes) {
        Ok(()) => bytes.iter().map(|b| format!("{b:02x}")).collect(),
        Err(error) => {
            tracing::warn!(%error, "OS randomness unavailable; using counter-based request id");
            let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
            let count = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);
            format!("{nanos:016x}{count:016x}")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn ids_are_32_hex_chars() {
        let id = generate();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<String> = (0..100).map(|_| generate()).collect();
        assert_eq!(ids.len(), 100);
    }
}
