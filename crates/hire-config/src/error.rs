//! Errors raised while assembling [`crate::HireConfig`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or `HIRE_*` variable could not be merged or extracted.
    #[error("failed to read configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A `.env` file exists but could not be read or parsed.
    #[error("failed to load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    /// A field parsed but holds a value the client cannot run with.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
