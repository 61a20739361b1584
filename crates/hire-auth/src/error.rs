use hire_core::SessionKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not signed in as {0}; run `hire auth login --kind {0}`")]
    NotAuthenticated(SessionKind),

    #[error("{kind} sign-in expects {expected}")]
    CredentialMismatch {
        kind: SessionKind,
        expected: &'static str,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("auth API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("unexpected auth response: {0}")]
    Decode(String),
}
