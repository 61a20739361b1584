//! Client error types.

use hire_auth::transport::error_message;
use hire_core::SessionKind;
use thiserror::Error;

/// Errors surfaced by the authenticated client and the extraction poller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed and the single refresh-and-retry did not recover.
    #[error("not authorized as {kind}; sign in again")]
    Unauthorized {
        /// Session kind inferred from the request path.
        kind: SessionKind,
    },

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Backend message or response body.
        message: String,
    },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A success response whose body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// The client stopped polling before the job reached a terminal status.
    ///
    /// Distinct from a job the backend reports as `failed`, which is returned
    /// as a normal status.
    #[error("extraction job {job_id} still unfinished after {attempts} status checks")]
    ExtractionTimeout {
        /// Job that was being polled.
        job_id: String,
        /// Status reads performed.
        attempts: u32,
    },
}

impl ApiError {
    /// Build a [`ApiError::Status`] from a non-success response.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Self::Status {
            status: status.as_u16(),
            message: error_message(status, body),
        }
    }

    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::ExtractionTimeout { .. })
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}
