//! # hire-auth
//!
//! Token lifecycle for the hiring platform client.
//!
//! Provides per-kind token storage over pluggable backends (OS keychain,
//! credentials file, memory), unverified claim inspection with a two-tier
//! expiry policy, and the login/signup/refresh/validate exchanges with the
//! backend auth API.

pub mod claims;
pub mod error;
pub mod models;
pub mod session;
pub mod storage;
pub mod token_store;
pub mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::AuthError;
pub use models::{Credential, LoginResponse, Registration, Validation};
pub use session::AuthSession;
pub use storage::SessionStore;
pub use token_store::{SessionStatus, TokenStore};
pub use transport::Transport;
