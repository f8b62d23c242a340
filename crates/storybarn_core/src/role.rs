//! Message roles for provider conversations.

use serde::{Deserialize, Serialize};

/// The role of a message sender in a provider conversation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// System instructions (the narrative brief)
    System,
    /// End-user content
    User,
    /// Prior model output
    Assistant,
}
