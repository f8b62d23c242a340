//! Message types for provider conversations.

use crate::{Content, Role};
use serde::{Deserialize, Serialize};

/// A message in a provider conversation.
///
/// # Examples
///
/// ```
/// use storybarn_core::{ChatMessage, Content, Role};
///
/// let message = ChatMessage {
///     role: Role::User,
///     content: vec![Content::Text("Tell me a story".to_string())],
/// };
///
/// assert_eq!(message.role, Role::User);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
pub struct ChatMessage {
    /// The role of the message sender
    pub role: Role,
    /// The content of the message (text, optionally images)
    pub content: Vec<Content>,
}

impl ChatMessage {
    /// Shorthand for a single-text message.
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: vec![Content::Text(text.into())],
        }
    }
}
