//! Extraction polling settings.

use std::time::Duration;

use hire_core::extraction::{EXTRACTION_MAX_POLLS, EXTRACTION_POLL_INTERVAL};
use serde::{Deserialize, Serialize};

#[allow(clippy::cast_possible_truncation)]
const fn default_poll_interval_ms() -> u64 {
    EXTRACTION_POLL_INTERVAL.as_millis() as u64
}

const fn default_max_polls() -> u32 {
    EXTRACTION_MAX_POLLS
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractionConfig {
    /// Milliseconds between two status reads.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Status reads before the client reports a timeout.
    #[serde(default = "default_max_polls")]
    pub max_polls: u32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            max_polls: default_max_polls(),
        }
    }
}

impl ExtractionConfig {
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_crate_constants() {
        let config = ExtractionConfig::default();
        assert_eq!(config.poll_interval(), EXTRACTION_POLL_INTERVAL);
        assert_eq!(config.max_polls, EXTRACTION_MAX_POLLS);
    }
}
