//! # hire-api
//!
//! Authenticated HTTP access to the hiring platform backend.
//!
//! [`ApiClient`] wraps a [`hire_auth::Transport`] with the request and
//! response interceptors that every call shares: correlation ids, choosing
//! between the employer and candidate sessions, proactive token refresh
//! deduplicated per session kind, and one refresh-and-retry on `401`.
//! [`ExtractionClient`] builds the submit-then-poll job flow on top of it.

pub mod client;
pub mod error;
pub mod extraction;
pub mod redirect;
pub mod refresh_gate;
pub mod request_id;
pub mod routing;

pub use client::ApiClient;
pub use error::ApiError;
pub use extraction::{ExtractionClient, PollSettings};
pub use redirect::{LogRedirect, LoginRedirect};
pub use refresh_gate::RefreshGate;
