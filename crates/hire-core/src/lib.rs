//! # hire-core
//!
//! Foundational types shared across the hiring platform client crates:
//! - Session kinds (employer / candidate) and token roles
//! - Token pairs and decoded token claims
//! - Extraction job request, status, and result payloads
//! - Cross-cutting error types

pub mod claims;
pub mod errors;
pub mod extraction;
pub mod session;

pub use claims::TokenClaims;
pub use errors::CoreError;
pub use extraction::{
    EXTRACTION_MAX_POLLS, EXTRACTION_POLL_INTERVAL, ExtractedJob, ExtractionRequest,
    ExtractionStatus, ExtractionSubmitted, JobStatus,
};
pub use session::{SessionKind, TokenKind, TokenPair};
