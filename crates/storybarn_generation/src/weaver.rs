//! The generation proxy service object.

use crate::{
    analysis_brief, dalle_prompt, extract_json, illustration_prompt, narrative_brief, parse_json,
    story_prompt, RetryPolicy,
};
use base64::Engine;
use serde::Deserialize;
use std::sync::Arc;
use storybarn_core::{
    ChatMessage, ChatRequest, Content, DraftConfig, Image, ImageAnalysis, ImageRequest,
    MediaSource, NewImage, NewStory, Role, SelectedImages, Story, StoryMetadata,
};
use storybarn_error::{RepositoryError, StorybarnResult, ValidationError};
use storybarn_interface::{ImageDriver, TextDriver};
use storybarn_models::{ImaginePrompt, MidjourneyClient, ProviderJournal};
use storybarn_repository::{ImageRepository, StoryRepository};
use storybarn_storage::ImageStore;
use tracing::{debug, info, instrument, warn};

/// Book id used when an endpoint did not name one.
const DEFAULT_BOOK_ID: &str = "default";

/// The shape a story response must parse into.
#[derive(Debug, Deserialize)]
struct StoryPayload {
    title: String,
    content: String,
    #[serde(default)]
    metadata: StoryMetadata,
}

/// A direct illustration request, as accepted by the image endpoints.
#[derive(Debug, Clone, Default)]
pub struct IllustrationSpec {
    /// What the illustration shows
    pub prompt: String,
    /// Illustration style name
    pub art_style: Option<String>,
    /// Coat colors to keep consistent
    pub colors: Vec<String>,
    /// Book the image belongs to
    pub book_id: Option<String>,
}

/// The generation proxy: one validated configuration in, one persisted
/// story or image out.
///
/// Dependencies are injected at construction so tests can build isolated
/// instances with scripted drivers; nothing here is process-global.
pub struct StoryWeaver {
    text: Arc<dyn TextDriver>,
    image: Arc<dyn ImageDriver>,
    stories: Arc<dyn StoryRepository>,
    images: Arc<dyn ImageRepository>,
    store: ImageStore,
    journal: Arc<ProviderJournal>,
    midjourney: MidjourneyClient,
    retry: RetryPolicy,
}

impl StoryWeaver {
    /// Wire up a proxy over the given drivers, repositories, and store.
    pub fn new(
        text: Arc<dyn TextDriver>,
        image: Arc<dyn ImageDriver>,
        stories: Arc<dyn StoryRepository>,
        images: Arc<dyn ImageRepository>,
        store: ImageStore,
        journal: Arc<ProviderJournal>,
    ) -> Self {
        let midjourney = MidjourneyClient::new(journal.clone());
        Self {
            text,
            image,
            stories,
            images,
            store,
            journal,
            midjourney,
            retry: RetryPolicy::default(),
        }
    }

    /// Override the retry schedule (tests, interactive tooling).
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Reject incomplete configurations before any provider call is made.
    fn validate(config: &DraftConfig) -> StorybarnResult<()> {
        let issues = config.completeness_issues();
        if !issues.is_empty() {
            let err = ValidationError::new(issues);
            debug!(fields = %err.field_names(), "Rejected incomplete configuration");
            return Err(err.into());
        }
        Ok(())
    }

    /// Generate a story from a complete configuration and persist it.
    ///
    /// The provider is asked for structured JSON; extraction and parsing
    /// happen inside the retry loop, so a malformed response gets the same
    /// bounded retries as an upstream failure.
    #[instrument(skip(self, config), fields(theme = %config.theme))]
    pub async fn generate_story(&self, config: &DraftConfig) -> StorybarnResult<Story> {
        Self::validate(config)?;

        let request = ChatRequest {
            messages: vec![
                ChatMessage::text(Role::System, narrative_brief()),
                ChatMessage::text(Role::User, story_prompt(config)),
            ],
            max_tokens: Some(2048),
            temperature: Some(0.8),
            model: None,
        };

        let provider = self.text.provider_name();
        self.journal.record(
            provider,
            "request",
            format!("story generation, theme {:?}", config.theme),
        );

        let payload = self
            .retry
            .run(|| {
                let text = &self.text;
                let request = &request;
                async move {
                    let response = text.generate(request).await?;
                    let json = extract_json(&response.text)?;
                    parse_json::<StoryPayload>(&json)
                }
            })
            .await
            .inspect_err(|e| self.journal.record(provider, "error", e.to_string()))?;

        let mut metadata = payload.metadata;
        if metadata.word_count == 0 {
            metadata.word_count = payload.content.split_whitespace().count() as u32;
        }

        let story = self
            .stories
            .create(NewStory {
                title: payload.title,
                protagonist: protagonist_line(config),
                setting: format!("Maplewood Farm: {}", config.farm_elements.join(", ")),
                theme: config.theme.clone(),
                content: payload.content,
                selected_images: SelectedImages::default(),
                metadata,
                art_style: config.art_style.clone(),
            })
            .await?;

        self.journal.record(
            provider,
            "response",
            format!("story {} ({} words)", story.id, story.metadata.word_count),
        );
        info!(id = story.id, title = %story.title, "Generated story");
        Ok(story)
    }

    /// Generate an illustration from a complete configuration and persist
    /// both the bytes and the record.
    #[instrument(skip(self, config))]
    pub async fn generate_illustration(
        &self,
        config: &DraftConfig,
        book_id: Option<&str>,
    ) -> StorybarnResult<Image> {
        Self::validate(config)?;
        self.create_illustration(illustration_prompt(config), book_id)
            .await
    }

    /// Generate an illustration from a direct prompt (the DALL-E-style
    /// endpoint).
    #[instrument(skip(self, spec), fields(prompt_len = spec.prompt.len()))]
    pub async fn generate_image_from_prompt(
        &self,
        spec: &IllustrationSpec,
    ) -> StorybarnResult<Image> {
        if spec.prompt.trim().is_empty() {
            return Err(ValidationError::single("prompt", "a prompt is required").into());
        }

        let prompt = dalle_prompt(&spec.prompt, spec.art_style.as_deref(), &spec.colors);
        self.create_illustration(prompt, spec.book_id.as_deref())
            .await
    }

    /// Record a MidJourney-style job and its pending image.
    ///
    /// No dispatch happens; the job stays pending until a status update
    /// arrives through the image repository.
    #[instrument(skip(self, prompt))]
    pub async fn generate_midjourney(
        &self,
        prompt: &ImaginePrompt,
        book_id: Option<&str>,
    ) -> StorybarnResult<Image> {
        if prompt.description.trim().is_empty() {
            return Err(ValidationError::single("description", "a description is required").into());
        }

        let book_id = book_id.unwrap_or(DEFAULT_BOOK_ID);
        let job = self.midjourney.submit(prompt);

        self.images
            .create(NewImage {
                book_id: book_id.to_string(),
                path: String::new(),
                order: self.next_order(book_id).await,
                selected: false,
                midjourney: Some(job),
            })
            .await
    }

    /// Analyze a stored image with the vision-capable text provider.
    ///
    /// Idempotent: an already-analyzed image returns the stored analysis
    /// without any provider call.
    #[instrument(skip(self))]
    pub async fn analyze_image(&self, image_id: i32) -> StorybarnResult<Image> {
        let image = self
            .images
            .get(image_id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("image", image_id))?;

        if image.analyzed && image.analysis.is_some() {
            debug!(id = image_id, "Analysis cache hit");
            return Ok(image);
        }

        // Distinct failure from the missing record above: the record exists
        // but its bytes are gone.
        let bytes = self.store.read(&image.path).await?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);

        let request = ChatRequest {
            messages: vec![
                ChatMessage::text(Role::System, analysis_brief()),
                ChatMessage {
                    role: Role::User,
                    content: vec![
                        Content::Text(
                            "Describe this illustration and profile the pictured character."
                                .to_string(),
                        ),
                        Content::Image {
                            mime: Some(mime_for_path(&image.path).to_string()),
                            source: MediaSource::Base64(encoded),
                        },
                    ],
                },
            ],
            max_tokens: Some(512),
            temperature: Some(0.2),
            model: None,
        };

        let provider = self.text.provider_name();
        self.journal.record(
            provider,
            "request",
            format!("analysis of image {} ({} bytes)", image_id, bytes.len()),
        );

        let analysis = self
            .retry
            .run(|| {
                let text = &self.text;
                let request = &request;
                async move {
                    let response = text.generate(request).await?;
                    let json = extract_json(&response.text)?;
                    parse_json::<ImageAnalysis>(&json)
                }
            })
            .await
            .inspect_err(|e| self.journal.record(provider, "error", e.to_string()))?;

        let updated = self
            .images
            .update_metadata(
                image_id,
                storybarn_core::ImagePatch {
                    analysis: Some(analysis),
                    ..Default::default()
                },
            )
            .await?;

        self.journal
            .record(provider, "response", format!("analysis of image {}", image_id));
        Ok(updated)
    }

    /// Shared provider-call-and-persist path for illustrations.
    async fn create_illustration(
        &self,
        prompt: String,
        book_id: Option<&str>,
    ) -> StorybarnResult<Image> {
        let book_id = book_id.unwrap_or(DEFAULT_BOOK_ID);
        let request = ImageRequest {
            prompt,
            size: Some("1024x1024".to_string()),
            model: None,
        };

        let provider = self.image.provider_name();
        self.journal.record(
            provider,
            "request",
            format!("illustration, {} chars of prompt", request.prompt.len()),
        );

        let payload = self
            .retry
            .run(|| {
                let image = &self.image;
                let request = &request;
                async move { image.generate_image(request).await }
            })
            .await
            .inspect_err(|e| self.journal.record(provider, "error", e.to_string()))?;

        // Storage writes are not retried: a failed write fails the request.
        let path = self
            .store
            .store(book_id, &payload.bytes, payload.extension())
            .await?;

        let stored = self
            .images
            .create(NewImage {
                book_id: book_id.to_string(),
                path,
                order: self.next_order(book_id).await,
                selected: false,
                midjourney: None,
            })
            .await?;

        self.journal.record(
            provider,
            "response",
            format!("image {} at {}", stored.id, stored.path),
        );
        info!(id = stored.id, path = %stored.path, "Generated image");
        Ok(stored)
    }

    /// Next sequence position within a book.
    ///
    /// Ordering is a convenience field; a failure to compute it is logged
    /// and ignored rather than failing the request.
    async fn next_order(&self, book_id: &str) -> i32 {
        match self.images.list().await {
            Ok(all) => all.iter().filter(|i| i.book_id == book_id).count() as i32 + 1,
            Err(e) => {
                warn!(error = %e, book_id, "Could not compute image order; defaulting");
                1
            }
        }
    }
}

/// One-line protagonist summary for the story record.
fn protagonist_line(config: &DraftConfig) -> String {
    let coat = if config.protagonist.appearance.trim().is_empty() {
        "black and tan".to_string()
    } else {
        config.protagonist.appearance.trim().to_string()
    };
    match config
        .protagonist
        .name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
    {
        Some(name) => format!(
            "{}, a {} Yorkshire Terrier with a {} coat",
            name, config.protagonist.personality, coat
        ),
        None => format!(
            "A {} Yorkshire Terrier with a {} coat",
            config.protagonist.personality, coat
        ),
    }
}

fn mime_for_path(path: &str) -> &'static str {
    let lower = path.to_ascii_lowercase();
    if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else if lower.ends_with(".webp") {
        "image/webp"
    } else if lower.ends_with(".gif") {
        "image/gif"
    } else {
        "image/png"
    }
}
