//! `/imagine` prompt formatting.

use serde::{Deserialize, Serialize};

/// The pieces of a MidJourney-style illustration prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImaginePrompt {
    /// What the illustration shows
    pub description: String,
    /// Character details worth keeping consistent across a book
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characteristics: Option<String>,
    /// Scene setting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setting: Option<String>,
    /// Illustration style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub art_style: Option<String>,
}

impl ImaginePrompt {
    /// Render the `/imagine` command string.
    ///
    /// Children's-book framing is always applied; optional parts are
    /// appended in a fixed order so identical inputs produce identical
    /// prompts.
    pub fn format(&self) -> String {
        let mut prompt = format!(
            "/imagine prompt: children's storybook illustration of {}",
            self.description.trim()
        );

        if let Some(characteristics) = self
            .characteristics
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            prompt.push_str(", ");
            prompt.push_str(characteristics);
        }

        if let Some(setting) = self
            .setting
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            prompt.push_str(", set in ");
            prompt.push_str(setting);
        }

        if let Some(style) = self
            .art_style
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            prompt.push_str(", in ");
            prompt.push_str(style);
            prompt.push_str(" style");
        }

        prompt.push_str(" --ar 3:2");
        prompt
    }
}
