//! The draft configuration assembled by the wizard.

use serde::{Deserialize, Serialize};
use storybarn_error::FieldIssue;

/// The story's hero: a Yorkshire Terrier with a name, temperament, and coat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Protagonist {
    /// The pup's name, when the user picked one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Temperament, e.g. "brave and loyal"
    #[serde(default)]
    pub personality: String,
    /// Coat description, e.g. "black and tan"
    #[serde(default)]
    pub appearance: String,
}

/// The story's antagonist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Antagonist {
    /// Antagonist kind, e.g. "squirrel-gang"
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Temperament, e.g. "mischievous"
    #[serde(default)]
    pub personality: String,
}

/// The illustration style for the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ArtStyle {
    /// Style name, e.g. "whimsical"
    #[serde(default)]
    pub style: String,
    /// Longer description used in illustration prompts
    #[serde(default)]
    pub description: String,
}

/// The full configuration submitted for story generation.
///
/// Accumulated across wizard steps and finalized before submission. A config
/// is submittable only when [`DraftConfig::completeness_issues`] is empty.
///
/// # Examples
///
/// ```
/// use storybarn_core::DraftConfig;
///
/// let config = DraftConfig::default();
/// // An empty config is missing every required field.
/// assert_eq!(config.completeness_issues().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DraftConfig {
    /// The hero
    #[serde(default)]
    pub protagonist: Protagonist,
    /// The antagonist
    #[serde(default)]
    pub antagonist: Antagonist,
    /// Story theme, e.g. "friendship"
    #[serde(default)]
    pub theme: String,
    /// Overall mood, e.g. "lighthearted"
    #[serde(default)]
    pub mood: String,
    /// Illustration style
    #[serde(default)]
    pub art_style: ArtStyle,
    /// Ordered farm setting tags, e.g. "red barn", "hay bales"
    #[serde(default)]
    pub farm_elements: Vec<String>,
    /// A previously uploaded image chosen as reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_image: Option<i32>,
}

impl DraftConfig {
    /// The completeness invariant: the single definition shared by the
    /// wizard's finalize and the generation proxy's re-validation.
    ///
    /// Returns one issue per missing required field; empty means submittable.
    pub fn completeness_issues(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        if self.protagonist.personality.trim().is_empty() {
            issues.push(FieldIssue::new(
                "protagonist.personality",
                "a personality for the pup is required",
            ));
        }
        if self.antagonist.kind.trim().is_empty() {
            issues.push(FieldIssue::new(
                "antagonist.type",
                "an antagonist is required",
            ));
        }
        if self.theme.trim().is_empty() {
            issues.push(FieldIssue::new("theme", "a story theme is required"));
        }
        if self.art_style.style.trim().is_empty() {
            issues.push(FieldIssue::new("artStyle.style", "an art style is required"));
        }
        issues
    }

    /// True when every required field is present.
    pub fn is_complete(&self) -> bool {
        self.completeness_issues().is_empty()
    }
}
