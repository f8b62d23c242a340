//! Shared application state.

use std::sync::Arc;
use storybarn_generation::StoryWeaver;
use storybarn_models::ProviderJournal;
use storybarn_repository::{ImageRepository, StoryRepository};
use storybarn_storage::ImageStore;

/// Dependency-injected state carried by every handler.
///
/// Constructed once in `main` (or per test); nothing in here is a process
/// global.
#[derive(Clone)]
pub struct AppState {
    /// The generation proxy
    pub weaver: Arc<StoryWeaver>,
    /// Story storage
    pub stories: Arc<dyn StoryRepository>,
    /// Image storage (records)
    pub images: Arc<dyn ImageRepository>,
    /// Image storage (bytes)
    pub store: ImageStore,
    /// Provider event journal
    pub journal: Arc<ProviderJournal>,
}

impl AppState {
    /// Assemble state from its parts.
    pub fn new(
        weaver: Arc<StoryWeaver>,
        stories: Arc<dyn StoryRepository>,
        images: Arc<dyn ImageRepository>,
        store: ImageStore,
        journal: Arc<ProviderJournal>,
    ) -> Self {
        Self {
            weaver,
            stories,
            images,
            store,
            journal,
        }
    }
}
