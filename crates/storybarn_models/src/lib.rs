//! Generative provider clients for Storybarn.
//!
//! This crate provides the concrete provider integrations behind the
//! [`storybarn_interface`] traits:
//! - [`OpenAiChatClient`]: chat-completions text generation, including
//!   vision requests with embedded images
//! - [`OpenAiImageClient`]: image generation with base64 payloads
//! - [`midjourney`]: `/imagine` prompt formatting and job bookkeeping
//!   (the live chat transport is disabled; jobs stay pending)
//! - [`ProviderJournal`]: bounded in-process journal of provider events,
//!   the backing store for the debug-logs endpoint

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod journal;
pub mod midjourney;
pub mod openai;

pub use journal::{JournalEntry, ProviderJournal};
pub use midjourney::{ImaginePrompt, MidjourneyClient};
pub use openai::{OpenAiChatClient, OpenAiImageClient};
