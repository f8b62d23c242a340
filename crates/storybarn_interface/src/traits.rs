//! Trait definitions for generative-provider backends.

use async_trait::async_trait;
use storybarn_core::{ChatRequest, ChatResponse, ImagePayload, ImageRequest};
use storybarn_error::StorybarnResult;

/// Core trait for text-generation backends.
///
/// One call per attempt; retry and error classification happen in the
/// generation proxy and provider client respectively.
#[async_trait]
pub trait TextDriver: Send + Sync {
    /// Generate model output for a conversation.
    async fn generate(&self, req: &ChatRequest) -> StorybarnResult<ChatResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4o-mini").
    fn model_name(&self) -> &str;
}

/// Trait for image-generation backends.
#[async_trait]
pub trait ImageDriver: Send + Sync {
    /// Generate an illustration and return the decoded payload.
    async fn generate_image(&self, req: &ImageRequest) -> StorybarnResult<ImagePayload>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "dall-e-3").
    fn model_name(&self) -> &str;
}

/// Trait for text backends that accept image inputs (vision analysis).
pub trait Vision: TextDriver {
    /// Maximum number of images per request.
    fn max_images_per_request(&self) -> usize {
        1
    }

    /// Supported image formats (MIME types).
    fn supported_image_formats(&self) -> &[&'static str] {
        &["image/png", "image/jpeg", "image/webp", "image/gif"]
    }

    /// Maximum image size in bytes.
    fn max_image_size_bytes(&self) -> usize {
        20 * 1024 * 1024
    }
}
