//! Test utilities for HTTP-level tests: scripted drivers and a wired rig.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storybarn_core::{ChatRequest, ChatResponse, ImagePayload, ImageRequest};
use storybarn_error::{ProviderError, ProviderErrorKind, StorybarnResult};
use storybarn_generation::{RetryPolicy, StoryWeaver};
use storybarn_interface::{ImageDriver, TextDriver};
use storybarn_models::ProviderJournal;
use storybarn_repository::{MemoryImageRepository, MemoryStoryRepository};
use storybarn_server::{create_router, AppState};
use storybarn_storage::ImageStore;

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    Success(String),
    Error(ProviderErrorKind),
}

/// Scripted text driver; the last reply repeats once the script runs out.
pub struct MockTextDriver {
    script: Mutex<VecDeque<MockReply>>,
    last: Mutex<MockReply>,
    calls: AtomicUsize,
}

impl MockTextDriver {
    pub fn new(replies: Vec<MockReply>) -> Self {
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
impl TextDriver for MockTextDriver {
    async fn generate(&self, _req: &ChatRequest) -> StorybarnResult<ChatResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
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

/// Scripted image driver.
pub struct MockImageDriver {
    reply: MockReply,
    calls: AtomicUsize,
}

impl MockImageDriver {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ImageDriver for MockImageDriver {
    async fn generate_image(&self, _req: &ImageRequest) -> StorybarnResult<ImagePayload> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.reply.clone() {
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

/// A wired server plus the handles tests assert against.
pub struct Rig {
    pub server: axum_test::TestServer,
    pub text: Arc<MockTextDriver>,
    pub stories: Arc<MemoryStoryRepository>,
    pub images: Arc<MemoryImageRepository>,
    pub store: ImageStore,
    pub _dir: tempfile::TempDir,
}

impl Rig {
    /// Wire a rig with the given drivers. The retry schedule keeps the
    /// spec's 3 attempts but with zero backoff so HTTP tests stay fast;
    /// the timing property is covered at the generation layer.
    pub fn new(text: MockTextDriver, image: MockImageDriver) -> Self {
        let dir = tempfile::TempDir::new().unwrap();
        let text = Arc::new(text);
        let image = Arc::new(image);
        let stories = Arc::new(MemoryStoryRepository::new());
        let images = Arc::new(MemoryImageRepository::new());
        let store = ImageStore::new(dir.path()).unwrap();
        let journal = Arc::new(ProviderJournal::new());

        let weaver = Arc::new(
            StoryWeaver::new(
                text.clone(),
                image.clone(),
                stories.clone(),
                images.clone(),
                store.clone(),
                journal.clone(),
            )
            .with_retry_policy(RetryPolicy::new(3, Duration::ZERO)),
        );

        let state = AppState::new(weaver, stories.clone(), images.clone(), store.clone(), journal);
        let server = axum_test::TestServer::new(create_router(state)).unwrap();

        Self {
            server,
            text,
            stories,
            images,
            store,
            _dir: dir,
        }
    }
}

/// A well-formed story reply, as the stub provider would return it.
pub fn story_reply() -> String {
    r#"{"title": "Biscuit Saves the Barn", "content": "Chapter 1. Once upon a time on Maplewood Farm...", "metadata": {"wordCount": 480, "chapterCount": 3, "tone": "warm", "protagonist": {"name": "Biscuit", "personality": "brave and loyal", "description": "small, black and tan"}}}"#
        .to_string()
}

/// A well-formed analysis reply.
pub fn analysis_reply() -> String {
    r#"{"description": "A pup stands proudly by the red barn.", "characterProfile": {"name": "Biscuit", "personality": "proud", "description": "small, black and tan"}}"#
        .to_string()
}

/// The scenario-A configuration body.
pub fn scenario_config() -> serde_json::Value {
    serde_json::json!({
        "protagonist": {"personality": "brave and loyal", "appearance": "black and tan"},
        "antagonist": {"type": "squirrel-gang", "personality": "mischievous"},
        "theme": "friendship",
        "mood": "lighthearted",
        "artStyle": {"style": "whimsical", "description": "playful"},
        "farmElements": ["red barn"]
    })
}
