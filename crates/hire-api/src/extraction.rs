//! Submit-then-poll client for backend job extraction.
//!
//! A poll runs to a terminal status or to the attempt ceiling. There is no
//! cancellation: dropping the stream (or the `poll` future) only stops
//! observing it.

use std::pin::pin;
use std::time::Duration;

use futures_util::{Stream, StreamExt as _, stream};
use hire_config::ExtractionConfig;
use hire_core::{
    EXTRACTION_MAX_POLLS, EXTRACTION_POLL_INTERVAL, ExtractionRequest, ExtractionStatus,
    ExtractionSubmitted,
};

use crate::client::ApiClient;
use crate::error::ApiError;

/// Interval and attempt ceiling shared by every poll of one client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_polls: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: EXTRACTION_POLL_INTERVAL,
            max_polls: EXTRACTION_MAX_POLLS,
        }
    }
}

impl PollSettings {
    #[must_use]
    pub const fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            interval: config.poll_interval(),
            max_polls: config.max_polls,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum PollState {
    Fetch { attempt: u32 },
    Exhausted,
    Done,
}

#[derive(Debug, Clone)]
pub struct ExtractionClient {
    api: ApiClient,
    settings: PollSettings,
}

impl ExtractionClient {
    /// A `max_polls` of zero is raised to one; every poll reads at least once.
    #[must_use]
    pub const fn new(api: ApiClient, mut settings: PollSettings) -> Self {
        if settings.max_polls == 0 {
            settings.max_polls = 1;
        }
        Self { api, settings }
    }

    #[must_use]
    pub const fn settings(&self) -> PollSettings {
        self.settings
    }

    /// Start an extraction job. The returned status is never terminal.
    ///
    /// # Errors
    ///
    /// Propagates every [`ApiError`] from the request; nothing is polled.
    pub async fn submit(
        &self,
        request: &ExtractionRequest,
    ) -> Result<ExtractionSubmitted, ApiError> {
        let submitted: ExtractionSubmitted = self.api.post_json("/extract", request).await?;
        tracing::info!(job_id = %submitted.id, status = %submitted.status, "extraction submitted");
        Ok(submitted)
    }

    /// Read the current status of job `id` once.
    ///
    /// # Errors
    ///
    /// Propagates every [`ApiError`] from the request.
    pub async fn status(&self, id: &str) -> Result<ExtractionStatus, ApiError> {
        let path = format!("/extract/{}", urlencoding::encode(id));
        self.api.get_json(&path).await
    }

    /// Lazy stream of status reads for job `id`.
    ///
    /// Yields each status read in order and ends after the first terminal
    /// one. A failed read is yielded as an error and ends the stream. After
    /// `max_polls` non-terminal reads the last item is
    /// [`ApiError::ExtractionTimeout`]. The interval elapses between reads,
    /// never before the first one.
    pub fn updates(
        &self,
        id: &str,
    ) -> impl Stream<Item = Result<ExtractionStatus, ApiError>> + use<> {
        let client = self.clone();
        let id = id.to_string();
        stream::unfold(PollState::Fetch { attempt: 1 }, move |state| {
            let client = client.clone();
            let id = id.clone();
            async move { client.step(state, id).await }
        })
    }

    /// Poll job `id` until it is terminal, reporting every read to `on_update`.
    ///
    /// A backend-reported `failed` job is an `Ok` result.
    ///
    /// # Errors
    ///
    /// [`ApiError::ExtractionTimeout`] after `max_polls` non-terminal reads;
    /// otherwise the first error from a status read.
    pub async fn poll(
        &self,
        id: &str,
        mut on_update: impl FnMut(&ExtractionStatus),
    ) -> Result<ExtractionStatus, ApiError> {
        let mut updates = pin!(self.updates(id));
        while let Some(update) = updates.next().await {
            let status = update?;
            on_update(&status);
            if status.is_terminal() {
                return Ok(status);
            }
        }
        Err(self.timeout(id))
    }

    /// [`Self::submit`] then [`Self::poll`] the new job.
    ///
    /// # Errors
    ///
    /// A failed submit is returned at once, before any status read.
    pub async fn submit_and_poll(
        &self,
        request: &ExtractionRequest,
        on_update: impl FnMut(&ExtractionStatus),
    ) -> Result<ExtractionStatus, ApiError> {
        let submitted = self.submit(request).await?;
        self.poll(&submitted.id, on_update).await
    }

    async fn step(
        &self,
        state: PollState,
        id: String,
    ) -> Option<(Result<ExtractionStatus, ApiError>, PollState)> {
        match state {
            PollState::Fetch { attempt } => {
                if attempt > 1 {
                    tokio::time::sleep(self.settings.interval).await;
                }
                match self.status(&id).await {
                    Ok(status) => {
                        tracing::debug!(
                            job_id = %id,
                            attempt,
                            status = %status.status,
                            "extraction status",
                        );
                        let next = if status.is_terminal() {
                            PollState::Done
                        } else if attempt >= self.settings.max_polls {
                            PollState::Exhausted
                        } else {
                            PollState::Fetch { attempt: attempt + 1 }
                        };
                        Some((Ok(status), next))
                    }
                    Err(error) => {
                        tracing::warn!(
                            job_id = %id,
                            attempt,
                            %error,
                            "extraction status read failed",
                        );
                        Some((Err(error), PollState::Done))
                    }
                }
            }
            PollState::Exhausted => {
                tracing::warn!(
                    job_id = %id,
                    attempts = self.settings.max_polls,
                    "extraction polling gave up",
                );
                Some((Err(self.timeout(&id)), PollState::Done))
            }
            PollState::Done => None,
        }
    }

    fn timeout(&self, id: &str) -> ApiError {
        ApiError::ExtractionTimeout {
            job_id: id.to_string(),
            attempts: self.settings.max_polls,
        }
    }
}
