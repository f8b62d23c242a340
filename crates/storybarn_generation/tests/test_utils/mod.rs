//! Test utilities for generation-proxy tests.
//!
//! Scripted mock drivers with call counters, so tests can assert exactly
//! how many provider calls an operation made.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use storybarn_core::{ChatRequest, ChatResponse, ImagePayload, ImageRequest};
use storybarn_error::{ProviderError, ProviderErrorKind, StorybarnResult};
use storybarn_interface::{ImageDriver, TextDriver};
use storybarn_models::ProviderJournal;
use storybarn_repository::{MemoryImageRepository, MemoryStoryRepository};
use storybarn_storage::ImageStore;

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this text (or these bytes, for the image driver)
    Success(String),
    /// Fail with this kind
    Error(ProviderErrorKind),
}

/// Scripted text driver.
///
/// Replies are consumed in order; once the script runs out, the last reply
/// repeats. Every call is counted, including failures.
pub struct MockTextDriver {
    script: Mutex<VecDeque<MockReply>>,
    last: Mutex<MockReply>,
    calls: AtomicUsize,
    captured: Mutex<Vec<ChatRequest>>,
}

impl MockTextDriver {
    pub fn new_success(text: &str) -> Self {
        Self::new_sequence(vec![MockReply::Success(text.to_string())])
    }

    pub fn new_error(kind: ProviderErrorKind) -> Self {
        Self::new_sequence(vec![MockReply::Error(kind)])
    }

    pub fn new_sequence(replies: Vec<MockReply>) -> Self {
        let last = replies
            .last()
            .cloned()
            .unwrap_or(MockReply::Success(String::new()));
        Self {
            script: Mutex::new(replies.into()),
            last: Mutex::new(last),
            calls: AtomicUsize::new(0),
            captured: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests seen so far, for prompt assertions.
    pub fn captured(&self) -> Vec<ChatRequest> {
        self.captured.lock().unwrap().clone()
    }

    fn next_reply(&self) -> MockReply {
        let mut script = self.script.lock().unwrap();
        match script.pop_front() {
            Some(reply) => {
                if script.is_empty() {
                    *self.last.lock().unwrap() = reply.clone();
                }
                reply
            }
            None => self.last.lock().unwrap().clone(),
        }
    }
}

#[async_trait]
impl TextDriver for MockTextDriver {
    async fn generate(&self, req: &ChatRequest) -> StorybarnResult<ChatResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.captured.lock().unwrap().push(req.clone());
        match self.next_reply() {
            MockReply::Success(text) => Ok(ChatResponse { text }),
            MockReply::Error(kind) => Err(ProviderError::new(kind).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        "mock-text"
    }
}

/// Scripted image driver; success replies carry the payload bytes as text.
pub struct MockImageDriver {
    script: Mutex<VecDeque<MockReply>>,
    last: Mutex<MockReply>,
    calls: AtomicUsize,
}

impl MockImageDriver {
    pub fn new_success(bytes: &str) -> Self {
        Self::new_sequence(vec![MockReply::Success(bytes.to_string())])
    }

    pub fn new_error(kind: ProviderErrorKind) -> Self {
        Self::new_sequence(vec![MockReply::Error(kind)])
    }

    pub fn new_sequence(replies: Vec<MockReply>) -> Self {
        let last = replies
            .last()
            .cloned()
            .unwrap_or(MockReply::Success(String::new()));
        Self {
            script: Mutex::new(replies.into()),
            last: Mutex::new(last),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_reply(&self) -> MockReply {
        let mut script = self.script.lock().unwrap();
        match script.pop_front() {
            Some(reply) => {
                if script.is_empty() {
                    *self.last.lock().unwrap() = reply.clone();
                }
                reply
            }
            None => self.last.lock().unwrap().clone(),
        }
    }
}

#[async_trait]
impl ImageDriver for MockImageDriver {
    async fn generate_image(&self, _req: &ImageRequest) -> StorybarnResult<ImagePayload> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.next_reply() {
            MockReply::Success(bytes) => Ok(ImagePayload {
                bytes: bytes.into_bytes(),
                mime: "image/png".to_string(),
            }),
            MockReply::Error(kind) => Err(ProviderError::new(kind).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        "mock-image"
    }
}

/// Everything a weaver test needs, with handles kept for assertions.
pub struct Rig {
    pub text: Arc<MockTextDriver>,
    pub image: Arc<MockImageDriver>,
    pub stories: Arc<MemoryStoryRepository>,
    pub images: Arc<MemoryImageRepository>,
    pub journal: Arc<ProviderJournal>,
    pub store: ImageStore,
    pub _dir: tempfile::TempDir,
}

impl Rig {
    pub fn new(text: MockTextDriver, image: MockImageDriver) -> Self {
        let dir = tempfile::TempDir::new().unwrap();
        Self {
            text: Arc::new(text),
            image: Arc::new(image),
            stories: Arc::new(MemoryStoryRepository::new()),
            images: Arc::new(MemoryImageRepository::new()),
            journal: Arc::new(ProviderJournal::new()),
            store: ImageStore::new(dir.path()).unwrap(),
            _dir: dir,
        }
    }

    pub fn weaver(&self) -> storybarn_generation::StoryWeaver {
        storybarn_generation::StoryWeaver::new(
            self.text.clone(),
            self.image.clone(),
            self.stories.clone(),
            self.images.clone(),
            self.store.clone(),
            self.journal.clone(),
        )
    }
}

/// A complete configuration matching the end-to-end scenarios.
pub fn complete_config() -> storybarn_core::DraftConfig {
    storybarn_core::DraftConfig {
        protagonist: storybarn_core::Protagonist {
            name: None,
            personality: "brave and loyal".to_string(),
            appearance: "black and tan".to_string(),
        },
        antagonist: storybarn_core::Antagonist {
            kind: "squirrel-gang".to_string(),
            personality: "mischievous".to_string(),
        },
        theme: "friendship".to_string(),
        mood: "lighthearted".to_string(),
        art_style: storybarn_core::ArtStyle {
            style: "whimsical".to_string(),
            description: "playful".to_string(),
        },
        farm_elements: vec!["red barn".to_string()],
        selected_image: None,
    }
}

/// A well-formed story reply, as the stub provider would return it.
pub fn story_reply() -> String {
    r#"```json
{
  "title": "Biscuit Saves the Barn",
  "content": "Chapter 1. Once upon a time on Maplewood Farm, a small pup kept a big secret safe.",
  "metadata": {
    "wordCount": 480,
    "chapterCount": 3,
    "tone": "warm and playful",
    "protagonist": {
      "name": "Biscuit",
      "personality": "brave and loyal",
      "description": "a small Yorkshire Terrier with a black and tan coat"
    }
  }
}
```"#
        .to_string()
}

/// A well-formed analysis reply.
pub fn analysis_reply() -> String {
    r#"{"description": "A pup stands proudly by the red barn.", "characterProfile": {"name": "Biscuit", "personality": "proud", "description": "small, black and tan"}}"#
        .to_string()
}
