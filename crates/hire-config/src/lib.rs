//! # hire-config
//!
//! Layered configuration loading for the hiring platform client using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`HIRE_*` prefix, `__` as separator)
//! 2. Project-level `.hire/config.toml`
//! 3. User-level `~/.config/hire/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `HIRE_API__BASE_URL` -> `api.base_url`,
//! `HIRE_EXTRACTION__MAX_POLLS` -> `extraction.max_polls`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use hire_config::HireConfig;
//!
//! let config = HireConfig::load_with_dotenv().expect("config");
//! println!("backend: {}", config.api.base_url());
//! ```

mod api;
mod auth;
mod error;
mod extraction;

pub use api::ApiConfig;
pub use auth::{AuthConfig, StorageBackend};
pub use error::ConfigError;
pub use extraction::ExtractionConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HireConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

impl HireConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed, or
    /// [`ConfigError::InvalidValue`] if the result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the working directory or a parent, if one exists,
    /// then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Dotenv`] if a `.env` file is present but
    /// unreadable, otherwise the same errors as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(error) if error.not_found() => {}
            Err(error) => return Err(error.into()),
        }
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".hire/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("HIRE_").split("__"))
    }

    /// Reject values that would make the client misbehave silently.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.api.is_configured() {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".into(),
                reason: format!("'{}' is not an http(s) URL", self.api.base_url),
            });
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.extraction.max_polls == 0 {
            return Err(ConfigError::InvalidValue {
                field: "extraction.max_polls".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hire").join("config.toml"))
    }
}
