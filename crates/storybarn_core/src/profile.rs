//! Character profile shared by story metadata and image analysis.

use serde::{Deserialize, Serialize};

/// A character profile reported by the text provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CharacterProfile {
    /// Character name
    #[serde(default)]
    pub name: String,
    /// Temperament summary
    #[serde(default)]
    pub personality: String,
    /// Physical description
    #[serde(default)]
    pub description: String,
}
