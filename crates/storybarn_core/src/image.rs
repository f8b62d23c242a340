//! Persisted image records.

use crate::CharacterProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a MidJourney-style generation job.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JobStatus {
    /// Job recorded, no result yet
    Pending,
    /// Result received
    Completed,
    /// Job failed upstream
    Failed,
}

/// Bookkeeping for a MidJourney-style generation job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MidjourneyJob {
    /// The formatted `/imagine` prompt
    pub prompt: String,
    /// Current job status
    pub status: JobStatus,
    /// Upstream message id, once known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Result URL, once completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Art style the prompt was built with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub art_style: Option<String>,
}

/// Vision-provider analysis of an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    /// Scene description
    pub description: String,
    /// Profile of the pictured character
    pub character_profile: CharacterProfile,
}

/// An image as received from upload or generation, before the repository
/// assigns its id and timestamp. Analysis fields start unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewImage {
    /// Grouping key for the book this image belongs to
    pub book_id: String,
    /// Relative location under the upload root, or an external URL
    pub path: String,
    /// Sequence position within the book
    pub order: i32,
    /// Chosen for the final book
    pub selected: bool,
    /// MidJourney-style job bookkeeping, when this image came from one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub midjourney: Option<MidjourneyJob>,
}

/// An uploaded or generated image.
///
/// Invariant: `analyzed == true` implies `analysis.is_some()`. Records are
/// mutated only through [`ImagePatch`] merges; they are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Unique id assigned at creation
    pub id: i32,
    /// Grouping key for the book this image belongs to
    pub book_id: String,
    /// Relative location under the upload root, or an external URL
    pub path: String,
    /// Sequence position within the book
    pub order: i32,
    /// Chosen for the final book
    pub selected: bool,
    /// Analysis has run for this image
    pub analyzed: bool,
    /// Analysis result, present when `analyzed` is true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ImageAnalysis>,
    /// MidJourney-style job bookkeeping, when this image came from one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub midjourney: Option<MidjourneyJob>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A partial update merged into an existing [`Image`] record.
///
/// Only present fields are applied; everything else is left untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImagePatch {
    /// New selection state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
    /// New sequence position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    /// Analysis result; also flips `analyzed` on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ImageAnalysis>,
    /// New job status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_status: Option<JobStatus>,
    /// Upstream message id for the job
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_message_id: Option<String>,
    /// Result URL for the job
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_image_url: Option<String>,
}

impl ImagePatch {
    /// True when the patch carries no changes.
    pub fn is_empty(&self) -> bool {
        self == &ImagePatch::default()
    }
}
