//! Job-posting extraction types.
//!
//! Extraction runs on the backend (LLM-driven). The client submits a source,
//! receives a job id, and reads the job's status until it is terminal:
//!
//! ```text
//! pending → processing → completed
//!                      → failed
//! ```
//!
//! The client never writes status; only the backend moves a job forward.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Delay between two status reads of the same job.
pub const EXTRACTION_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Status reads allowed before the client gives up on a job.
pub const EXTRACTION_MAX_POLLS: u32 = 60;

// ---------------------------------------------------------------------------
// JobStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    /// `completed` and `failed` admit no further transition.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Request / response payloads
// ---------------------------------------------------------------------------

/// What to extract a job posting from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ExtractionRequest {
    /// Raw posting text pasted by the employer.
    Text { content: String },
    /// Public URL of an existing posting.
    Url { url: String },
}

/// Immediate reply to a submission. Status is never terminal here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSubmitted {
    pub id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub message: Option<String>,
}

/// Backend view of an extraction job at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionStatus {
    pub id: String,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_data: Option<ExtractedJob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Backend-side processing attempts.
    #[serde(default)]
    pub attempts: u32,
}

impl ExtractionStatus {
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Structured job posting produced by a completed extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedJob {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub salary_range: Option<String>,
    /// Fields the backend added that this client does not model yet.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
