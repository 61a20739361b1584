//! Backend API connection settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("hire-cli/", env!("CARGO_PKG_VERSION")).to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Backend root, without a trailing slash (e.g. `https://api.example.com/api`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Transport timeout applied to every request.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    pub fn is_configured(&self) -> bool {
        let url = self.base_url.trim();
        url.starts_with("http://") || url.starts_with("https://")
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000/api");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.user_agent.starts_with("hire-cli/"));
        assert!(config.is_configured());
    }

    #[test]
    fn base_url_strips_trailing_slash() {
        let config = ApiConfig {
            base_url: "https://api.example.com/api/ ".into(),
            ..Default::default()
        };
        assert_eq!(config.base_url(), "https://api.example.com/api");
    }

    #[test]
    fn not_configured_without_scheme() {
        let config = ApiConfig {
            base_url: "api.example.com".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }
}
