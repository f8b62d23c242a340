//! Content types for provider requests.

use crate::MediaSource;
use serde::{Deserialize, Serialize};

/// A piece of message content sent to a provider.
///
/// # Examples
///
/// ```
/// use storybarn_core::{Content, MediaSource};
///
/// let text = Content::Text("Write a story".to_string());
/// let image = Content::Image {
///     mime: Some("image/png".to_string()),
///     source: MediaSource::Base64("iVBORw0KGgo...".to_string()),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Content {
    /// Plain text content.
    Text(String),

    /// Image content (for vision-capable analysis requests).
    Image {
        /// MIME type, e.g. "image/png" or "image/jpeg"
        mime: Option<String>,
        /// Media source (URL, base64, or raw bytes)
        source: MediaSource,
    },
}

impl Content {
    /// The text payload, when this is a text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }
}
