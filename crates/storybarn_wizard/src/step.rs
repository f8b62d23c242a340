//! The ordered wizard steps.

use serde::{Deserialize, Serialize};

/// The fixed sequence of wizard steps.
///
/// # Examples
///
/// ```
/// use storybarn_wizard::WizardStep;
///
/// assert_eq!(WizardStep::Appearance.next(), Some(WizardStep::Personality));
/// assert_eq!(WizardStep::Review.next(), None);
/// ```
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
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum WizardStep {
    /// Coat colors and optional name
    Appearance,
    /// Temperament and mood
    Personality,
    /// Theme, antagonist, and farm elements
    StoryElements,
    /// Illustration style
    ArtStyle,
    /// Read-back before submission
    Review,
}

impl WizardStep {
    /// The step after this one, or `None` at the end.
    pub fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Appearance => Some(WizardStep::Personality),
            WizardStep::Personality => Some(WizardStep::StoryElements),
            WizardStep::StoryElements => Some(WizardStep::ArtStyle),
            WizardStep::ArtStyle => Some(WizardStep::Review),
            WizardStep::Review => None,
        }
    }
}
