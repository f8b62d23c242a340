//! The wizard controller: step sequencing, validation, finalize.

use crate::{
    art_style_description, normalize_antagonist_kind, Draft, DraftStore, StepValue, WizardStep,
    DEFAULT_FARM_ELEMENTS, DEFAULT_MOOD,
};
use storybarn_core::{Antagonist, ArtStyle, DraftConfig, Protagonist};
use storybarn_error::{FieldIssue, StorybarnResult, ValidationError};
use tracing::{debug, instrument};

/// Walks a user through the ordered wizard steps.
///
/// The controller owns a [`DraftStore`] and persists after every step, so a
/// reload resumes at the same point. Validation happens only at
/// [`WizardController::advance`] and [`WizardController::finalize`] time —
/// saving a half-filled step is always allowed.
pub struct WizardController<S: DraftStore> {
    store: S,
}

impl<S: DraftStore> WizardController<S> {
    /// Create a controller over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The saved draft, or the default when none exists. Never fails on
    /// absence.
    pub fn load_draft(&self) -> StorybarnResult<Draft> {
        self.store.load()
    }

    /// Overwrite one step's values and persist immediately.
    ///
    /// No validation here; last write per step wins.
    #[instrument(skip(self, value))]
    pub fn save_step(&self, value: StepValue) -> StorybarnResult<Draft> {
        let mut draft = self.store.load()?;
        draft.apply(value);
        self.store.save(&draft)?;
        Ok(draft)
    }

    /// Validate the current step and return the next one.
    ///
    /// Returns `Ok(None)` when `current` is the final step. A failed policy
    /// comes back as a [`ValidationError`] naming the missing fields; the
    /// caller surfaces it as a blocking notice and does not navigate.
    #[instrument(skip(self))]
    pub fn advance(&self, current: WizardStep) -> StorybarnResult<Option<WizardStep>> {
        let draft = self.store.load()?;
        let issues = step_issues(&draft, current);
        if !issues.is_empty() {
            let err = ValidationError::new(issues);
            debug!(step = %current, fields = %err.field_names(), "Step blocked");
            return Err(err.into());
        }
        Ok(current.next())
    }

    /// Merge all step values into a submittable [`DraftConfig`].
    ///
    /// Applies the defaults table, then the antagonist normalization rule,
    /// then the completeness invariant. Incomplete drafts are rejected
    /// without touching any provider.
    #[instrument(skip(self))]
    pub fn finalize(&self) -> StorybarnResult<DraftConfig> {
        let draft = self.store.load()?;
        let config = assemble(&draft);

        let issues = config.completeness_issues();
        if !issues.is_empty() {
            let err = ValidationError::new(issues);
            debug!(fields = %err.field_names(), "Finalize blocked");
            return Err(err.into());
        }

        Ok(config)
    }

    /// Discard the draft after a successful submission or abandonment.
    pub fn clear(&self) -> StorybarnResult<()> {
        self.store.clear()
    }
}

/// Per-step required-field policies.
fn step_issues(draft: &Draft, step: WizardStep) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    match step {
        WizardStep::Appearance => {
            let colors = draft
                .appearance
                .as_ref()
                .map(|a| a.colors.len())
                .unwrap_or(0);
            if colors == 0 {
                issues.push(FieldIssue::new("colors", "pick at least one coat color"));
            } else if colors > 3 {
                issues.push(FieldIssue::new("colors", "pick at most three coat colors"));
            }
        }
        WizardStep::Personality => {
            let personality = draft
                .personality
                .as_ref()
                .map(|p| p.personality.trim())
                .unwrap_or("");
            if personality.is_empty() {
                issues.push(FieldIssue::new("personality", "pick a personality"));
            }
        }
        WizardStep::StoryElements => {
            let story = draft.story.as_ref();
            if story.map(|s| s.theme.trim()).unwrap_or("").is_empty() {
                issues.push(FieldIssue::new("theme", "pick a story theme"));
            }
            if story
                .map(|s| s.antagonist_kind.trim())
                .unwrap_or("")
                .is_empty()
            {
                issues.push(FieldIssue::new("antagonistType", "pick an antagonist"));
            }
            if story.map(|s| s.farm_elements.len()).unwrap_or(0) == 0 {
                issues.push(FieldIssue::new(
                    "farmElements",
                    "pick at least one farm element",
                ));
            }
        }
        WizardStep::ArtStyle => {
            if draft
                .art
                .as_ref()
                .map(|a| a.style.trim())
                .unwrap_or("")
                .is_empty()
            {
                issues.push(FieldIssue::new("style", "pick an art style"));
            }
        }
        WizardStep::Review => {}
    }
    issues
}

/// Merge the draft sections into one configuration, applying defaults.
fn assemble(draft: &Draft) -> DraftConfig {
    let appearance = draft.appearance.clone().unwrap_or_default();
    let personality = draft.personality.clone().unwrap_or_default();
    let story = draft.story.clone().unwrap_or_default();
    let art = draft.art.clone().unwrap_or_default();

    let coat = appearance.colors.join(" and ");

    let mood = if personality.mood.trim().is_empty() {
        DEFAULT_MOOD.to_string()
    } else {
        personality.mood.clone()
    };

    let farm_elements = if story.farm_elements.is_empty() {
        DEFAULT_FARM_ELEMENTS.iter().map(|s| s.to_string()).collect()
    } else {
        story.farm_elements.clone()
    };

    let description = art
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| art_style_description(&art.style));

    DraftConfig {
        protagonist: Protagonist {
            name: appearance.name.clone(),
            personality: personality.personality.trim().to_string(),
            appearance: coat,
        },
        antagonist: Antagonist {
            kind: normalize_antagonist_kind(&story.antagonist_kind),
            personality: story.antagonist_personality.trim().to_string(),
        },
        theme: story.theme.trim().to_string(),
        mood,
        art_style: ArtStyle {
            style: art.style.trim().to_string(),
            description,
        },
        farm_elements,
        selected_image: draft.selected_image,
    }
}
