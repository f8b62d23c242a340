//! In-memory repository implementations.

use crate::{ImageRepository, StoryRepository};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;
use storybarn_core::{Image, ImagePatch, NewImage, NewStory, Story};
use storybarn_error::{RepositoryError, StorybarnResult};

/// Map + insertion-order index + id counter, all under one lock.
///
/// The counter increment and the insert happen under the same guard with no
/// await point between them, so ids stay gapless and unique even on a
/// parallel runtime.
#[derive(Debug)]
struct Table<T> {
    records: HashMap<i32, T>,
    order: Vec<i32>,
    next_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert(&mut self, build: impl FnOnce(i32) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let record = build(id);
        self.records.insert(id, record.clone());
        self.order.push(id);
        record
    }

    fn get(&self, id: i32) -> Option<T> {
        self.records.get(&id).cloned()
    }

    fn list(&self) -> Vec<T> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id).cloned())
            .collect()
    }
}

/// In-memory story repository (process lifetime).
#[derive(Debug, Default)]
pub struct MemoryStoryRepository {
    table: Mutex<Table<Story>>,
}

impl MemoryStoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoryRepository for MemoryStoryRepository {
    async fn create(&self, story: NewStory) -> StorybarnResult<Story> {
        let stored = self.table.lock().unwrap().insert(|id| Story {
            id,
            title: story.title,
            protagonist: story.protagonist,
            setting: story.setting,
            theme: story.theme,
            content: story.content,
            selected_images: story.selected_images,
            metadata: story.metadata,
            art_style: story.art_style,
            created_at: Utc::now(),
        });
        tracing::debug!(id = stored.id, title = %stored.title, "Created story");
        Ok(stored)
    }

    async fn get(&self, id: i32) -> StorybarnResult<Option<Story>> {
        Ok(self.table.lock().unwrap().get(id))
    }

    async fn list(&self) -> StorybarnResult<Vec<Story>> {
        Ok(self.table.lock().unwrap().list())
    }
}

/// In-memory image repository (process lifetime).
#[derive(Debug, Default)]
pub struct MemoryImageRepository {
    table: Mutex<Table<Image>>,
}

impl MemoryImageRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImageRepository for MemoryImageRepository {
    async fn create(&self, image: NewImage) -> StorybarnResult<Image> {
        let stored = self.table.lock().unwrap().insert(|id| Image {
            id,
            book_id: image.book_id,
            path: image.path,
            order: image.order,
            selected: image.selected,
            analyzed: false,
            analysis: None,
            midjourney: image.midjourney,
            created_at: Utc::now(),
        });
        tracing::debug!(id = stored.id, path = %stored.path, "Created image");
        Ok(stored)
    }

    async fn get(&self, id: i32) -> StorybarnResult<Option<Image>> {
        Ok(self.table.lock().unwrap().get(id))
    }

    async fn list(&self) -> StorybarnResult<Vec<Image>> {
        Ok(self.table.lock().unwrap().list())
    }

    async fn update_metadata(&self, id: i32, patch: ImagePatch) -> StorybarnResult<Image> {
        let mut table = self.table.lock().unwrap();
        let record = table
            .records
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("image", id))?;

        if let Some(selected) = patch.selected {
            record.selected = selected;
        }
        if let Some(order) = patch.order {
            record.order = order;
        }
        if let Some(analysis) = patch.analysis {
            record.analysis = Some(analysis);
            record.analyzed = true;
        }

        let has_job_patch = patch.job_status.is_some()
            || patch.job_message_id.is_some()
            || patch.job_image_url.is_some();
        match record.midjourney.as_mut() {
            Some(job) => {
                if let Some(status) = patch.job_status {
                    job.status = status;
                }
                if let Some(message_id) = patch.job_message_id {
                    job.message_id = Some(message_id);
                }
                if let Some(image_url) = patch.job_image_url {
                    job.image_url = Some(image_url);
                }
            }
            None if has_job_patch => {
                tracing::warn!(id, "Job patch for an image without a generation job; ignored");
            }
            None => {}
        }

        Ok(record.clone())
    }
}
