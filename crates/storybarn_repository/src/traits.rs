//! Repository trait definitions.

use async_trait::async_trait;
use storybarn_core::{Image, ImagePatch, NewImage, NewStory, Story};
use storybarn_error::StorybarnResult;

/// Storage for generated stories.
///
/// Ids start at 1, increase strictly in creation order, and are never
/// reused. A missing id is `Ok(None)`, not an error: callers decide whether
/// absence is exceptional.
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Persist a story, assigning the next id; returns the stored record.
    async fn create(&self, story: NewStory) -> StorybarnResult<Story>;

    /// Point lookup by id.
    async fn get(&self, id: i32) -> StorybarnResult<Option<Story>>;

    /// All stories in insertion order.
    async fn list(&self) -> StorybarnResult<Vec<Story>>;
}

/// Storage for uploaded and generated images.
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Persist an image, assigning the next id; returns the stored record.
    async fn create(&self, image: NewImage) -> StorybarnResult<Image>;

    /// Point lookup by id.
    async fn get(&self, id: i32) -> StorybarnResult<Option<Image>>;

    /// All images in insertion order.
    async fn list(&self) -> StorybarnResult<Vec<Image>>;

    /// Merge a partial update into an existing record.
    ///
    /// # Errors
    ///
    /// Fails with a repository `NotFound` when the id is absent.
    async fn update_metadata(&self, id: i32, patch: ImagePatch) -> StorybarnResult<Image>;
}
