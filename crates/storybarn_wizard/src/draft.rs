//! The in-progress draft accumulated across wizard steps.

use serde::{Deserialize, Serialize};

/// Coat colors and optional name picked on the appearance step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceSelection {
    /// Chosen coat colors, 1 to 3
    #[serde(default)]
    pub colors: Vec<String>,
    /// The pup's name, when given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Temperament picked on the personality step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PersonalitySelection {
    /// Temperament, e.g. "brave and loyal"
    #[serde(default)]
    pub personality: String,
    /// Overall mood for the story
    #[serde(default)]
    pub mood: String,
}

/// Theme, antagonist, and farm elements picked on the story step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StorySelection {
    /// Story theme
    #[serde(default)]
    pub theme: String,
    /// Antagonist kind
    #[serde(rename = "antagonistType", default)]
    pub antagonist_kind: String,
    /// Antagonist temperament
    #[serde(default)]
    pub antagonist_personality: String,
    /// Ordered farm setting tags
    #[serde(default)]
    pub farm_elements: Vec<String>,
}

/// Illustration style picked on the art step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ArtSelection {
    /// Style name
    #[serde(default)]
    pub style: String,
    /// Style description, backfilled at finalize when empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The draft: one optional section per step.
///
/// Absence of a section means the step has not been completed yet; that is
/// never an error until the step is validated at advance time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Appearance step values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appearance: Option<AppearanceSelection>,
    /// Personality step values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality: Option<PersonalitySelection>,
    /// Story-elements step values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<StorySelection>,
    /// Art-style step values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub art: Option<ArtSelection>,
    /// Reference image chosen during review
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_image: Option<i32>,
}

/// One step's worth of values, for [`crate::WizardController::save_step`].
///
/// Last write per step wins; saving performs no validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", content = "value", rename_all = "kebab-case")]
pub enum StepValue {
    /// Appearance step values
    Appearance(AppearanceSelection),
    /// Personality step values
    Personality(PersonalitySelection),
    /// Story-elements step values
    StoryElements(StorySelection),
    /// Art-style step values
    ArtStyle(ArtSelection),
    /// Reference image selection
    SelectedImage(Option<i32>),
}

impl Draft {
    /// Overwrite one step's section. Last write wins.
    pub fn apply(&mut self, value: StepValue) {
        match value {
            StepValue::Appearance(v) => self.appearance = Some(v),
            StepValue::Personality(v) => self.personality = Some(v),
            StepValue::StoryElements(v) => self.story = Some(v),
            StepValue::ArtStyle(v) => self.art = Some(v),
            StepValue::SelectedImage(v) => self.selected_image = v,
        }
    }
}
