//! MidJourney-style prompt formatting and job bookkeeping.
//!
//! The reference deployment dispatched `/imagine` prompts over a chat-bot
//! transport that is disabled; this module keeps the prompt format and the
//! pending-job bookkeeping so the rest of the pipeline is unchanged when a
//! transport is wired back in.

mod prompt;

pub use prompt::ImaginePrompt;

use crate::ProviderJournal;
use std::sync::Arc;
use storybarn_core::{JobStatus, MidjourneyJob};
use tracing::{info, instrument};

/// Formats `/imagine` prompts and records pending jobs.
///
/// `submit` never performs network I/O: it journals the prompt and returns a
/// [`MidjourneyJob`] in the [`JobStatus::Pending`] state. Status transitions
/// arrive later through image-record metadata updates.
#[derive(Debug, Clone)]
pub struct MidjourneyClient {
    journal: Arc<ProviderJournal>,
}

impl MidjourneyClient {
    /// Create a client journaling into the given journal.
    pub fn new(journal: Arc<ProviderJournal>) -> Self {
        Self { journal }
    }

    /// Format and record a job; dispatch is disabled, so the job stays pending.
    #[instrument(skip(self, prompt))]
    pub fn submit(&self, prompt: &ImaginePrompt) -> MidjourneyJob {
        let formatted = prompt.format();

        info!(prompt_len = formatted.len(), "Recorded imagine job (dispatch disabled)");
        self.journal
            .record("midjourney", "job", format!("queued pending: {}", formatted));

        MidjourneyJob {
            prompt: formatted,
            status: JobStatus::Pending,
            message_id: None,
            image_url: None,
            art_style: prompt.art_style.clone(),
        }
    }
}
