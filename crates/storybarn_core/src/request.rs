//! Request and response types for provider calls.

use crate::ChatMessage;
use serde::{Deserialize, Serialize};

/// A text-generation request.
///
/// # Examples
///
/// ```
/// use storybarn_core::{ChatMessage, ChatRequest, Role};
///
/// let request = ChatRequest {
///     messages: vec![ChatMessage::text(Role::User, "Hello!")],
///     max_tokens: Some(100),
///     temperature: Some(0.7),
///     model: None,
/// };
///
/// assert_eq!(request.messages.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder)]
#[builder(default)]
pub struct ChatRequest {
    /// The conversation messages to send
    pub messages: Vec<ChatMessage>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 1.0)
    pub temperature: Option<f32>,
    /// Model identifier to use (provider default when absent)
    pub model: Option<String>,
}

impl ChatRequest {
    /// Builder entry point.
    pub fn builder() -> ChatRequestBuilder {
        ChatRequestBuilder::default()
    }
}

/// A text-generation response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The generated text
    pub text: String,
}

/// An image-generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ImageRequest {
    /// The illustration prompt
    pub prompt: String,
    /// Requested dimensions, e.g. "1024x1024"
    pub size: Option<String>,
    /// Model identifier to use (provider default when absent)
    pub model: Option<String>,
}

/// A decoded image-generation payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    /// Decoded image bytes
    pub bytes: Vec<u8>,
    /// MIME type reported or assumed for the payload
    pub mime: String,
}

impl ImagePayload {
    /// File extension for the payload's MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime.as_str() {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        }
    }
}
