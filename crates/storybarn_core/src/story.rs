//! Persisted story records.

use crate::{ArtStyle, CharacterProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The three illustration slots of a finished book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SelectedImages {
    /// Opening illustration
    pub slot1: i32,
    /// Middle illustration
    pub slot2: i32,
    /// Closing illustration
    pub slot3: i32,
}

/// Provider-reported metadata about a generated story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StoryMetadata {
    /// Word count of the story body
    #[serde(default)]
    pub word_count: u32,
    /// Number of chapters
    #[serde(default)]
    pub chapter_count: u32,
    /// Tone summary, e.g. "warm and playful"
    #[serde(default)]
    pub tone: String,
    /// Profile of the protagonist as written
    #[serde(default)]
    pub protagonist: CharacterProfile,
}

/// A story as assembled by the generation proxy, before the repository
/// assigns its id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewStory {
    /// Story title
    pub title: String,
    /// Protagonist summary line
    pub protagonist: String,
    /// Setting summary line
    pub setting: String,
    /// Story theme as submitted
    pub theme: String,
    /// The story body
    pub content: String,
    /// The three illustration slots
    pub selected_images: SelectedImages,
    /// Provider-reported metadata
    pub metadata: StoryMetadata,
    /// Illustration style as submitted
    pub art_style: ArtStyle,
}

/// A generated story.
///
/// Ids are assigned by the story repository at creation, start at 1, and are
/// strictly increasing. A story is never mutated in place; no update path
/// exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    /// Unique id assigned at creation
    pub id: i32,
    /// Story title
    pub title: String,
    /// Protagonist summary line
    pub protagonist: String,
    /// Setting summary line
    pub setting: String,
    /// Story theme as submitted
    pub theme: String,
    /// The story body
    pub content: String,
    /// The three illustration slots
    pub selected_images: SelectedImages,
    /// Provider-reported metadata
    pub metadata: StoryMetadata,
    /// Illustration style as submitted
    pub art_style: ArtStyle,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
