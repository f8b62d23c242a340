//! Multi-step configuration wizard for Storybarn.
//!
//! The wizard walks a user through an ordered, fixed sequence of steps,
//! persisting partial input after every step and blocking forward
//! navigation until the current step's required fields are present. The
//! final step merges everything into a [`storybarn_core::DraftConfig`]
//! ready for submission.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod controller;
mod draft;
mod normalize;
mod step;
mod store;

pub use controller::WizardController;
pub use draft::{
    AppearanceSelection, ArtSelection, Draft, PersonalitySelection, StepValue, StorySelection,
};
pub use normalize::{
    art_style_description, normalize_antagonist_kind, DEFAULT_FARM_ELEMENTS, DEFAULT_MOOD,
};
pub use step::WizardStep;
pub use store::{DraftStore, FileDraftStore, MemoryDraftStore};
