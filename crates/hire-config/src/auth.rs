//! Token storage and login-surface settings.

use std::path::PathBuf;

use hire_core::SessionKind;
use serde::{Deserialize, Serialize};

/// Where token pairs are persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// OS keychain, one entry per namespaced key.
    Keyring,
    /// JSON credentials file under the home directory.
    #[default]
    File,
    /// Process memory only; nothing survives exit.
    Memory,
}

fn default_keyring_service() -> String {
    "hire-cli".to_string()
}

fn default_employer_login_url() -> String {
    "/employer/login".to_string()
}

fn default_candidate_login_url() -> String {
    "/candidate/login".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub storage: StorageBackend,

    /// Keyring service name. Override for tests to keep real credentials untouched.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,

    /// Credentials file location. Defaults to `~/.hire/credentials.json`.
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,

    /// Where an employer is sent after an unrecoverable auth failure.
    #[serde(default = "default_employer_login_url")]
    pub employer_login_url: String,

    /// Where a candidate is sent after an unrecoverable auth failure.
    #[serde(default = "default_candidate_login_url")]
    pub candidate_login_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::default(),
            keyring_service: default_keyring_service(),
            credentials_path: None,
            employer_login_url: default_employer_login_url(),
            candidate_login_url: default_candidate_login_url(),
        }
    }
}

impl AuthConfig {
    /// Login surface for a session kind.
    pub fn login_url(&self, kind: SessionKind) -> &str {
        match kind {
            SessionKind::Employer => &self.employer_login_url,
            SessionKind::Candidate => &self.candidate_login_url,
        }
    }

    /// Resolved credentials file path, or `None` when no home directory exists.
    pub fn credentials_path(&self) -> Option<PathBuf> {
        self.credentials_path.clone().or_else(|| {
            dirs::home_dir().map(|home| home.join(".hire").join("credentials.json"))
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = AuthConfig::default();
        assert_eq!(config.storage, StorageBackend::File);
        assert_eq!(config.keyring_service, "hire-cli");
        assert_eq!(config.login_url(SessionKind::Employer), "/employer/login");
        assert_eq!(config.login_url(SessionKind::Candidate), "/candidate/login");
    }

    #[test]
    fn explicit_credentials_path_wins() {
        let config = AuthConfig {
            credentials_path: Some(PathBuf::from("/tmp/creds.json")),
            ..Default::default()
        };
        assert_eq!(
            config.credentials_path(),
            Some(PathBuf::from("/tmp/creds.json"))
        );
    }
}
