//! Cross-cutting error types.
//!
//! Crate-specific errors (`AuthError`, `ApiError`, `ConfigError`) live in their
//! own crates. The CLI converges them through `anyhow`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A session kind string did not name `employer` or `candidate`.
    #[error("unknown session kind: {0}")]
    UnknownSessionKind(String),
}
