//! Core data types for the Storybarn service.
//!
//! This crate provides the foundation data types shared across the
//! workspace: the draft configuration accumulated by the wizard, the
//! persisted story and image records, and the trimmed provider
//! request/response model.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod content;
mod draft;
mod image;
mod media;
mod message;
mod profile;
mod request;
mod role;
mod story;

pub use content::Content;
pub use draft::{Antagonist, ArtStyle, DraftConfig, Protagonist};
pub use image::{Image, ImageAnalysis, ImagePatch, JobStatus, MidjourneyJob, NewImage};
pub use media::MediaSource;
pub use message::{ChatMessage, ChatMessageBuilder};
pub use profile::CharacterProfile;
pub use request::{
    ChatRequest, ChatRequestBuilder, ChatResponse, ImagePayload, ImageRequest,
};
pub use role::Role;
pub use story::{NewStory, SelectedImages, Story, StoryMetadata};
