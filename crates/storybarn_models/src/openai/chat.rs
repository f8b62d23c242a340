//! OpenAI chat-completions client.

use crate::openai::{
    classify_response, classify_transport, dto, retry_after_secs, DEFAULT_CHAT_URL,
    DEFAULT_TIMEOUT_SECS,
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use storybarn_core::{ChatRequest, ChatResponse};
use storybarn_error::{ProviderError, ProviderErrorKind, StorybarnResult};
use storybarn_interface::{TextDriver, Vision};
use tracing::{debug, instrument};

/// Client for the OpenAI chat-completions API.
///
/// Handles both plain text generation and vision requests (images embedded
/// as `data:` URLs). One HTTP call per [`TextDriver::generate`] invocation;
/// the generation proxy owns the retry schedule.
#[derive(Debug, Clone)]
pub struct OpenAiChatClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiChatClient {
    /// Creates a new client reading the key from `OPENAI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not set in the environment.
    #[instrument(skip_all, fields(model = %model))]
    pub fn new(model: String) -> StorybarnResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            ProviderError::new(ProviderErrorKind::MissingApiKey {
                provider: "openai".to_string(),
            })
        })?;
        Ok(Self::with_api_key(api_key, model))
    }

    /// Creates a new client with an explicit API key.
    pub fn with_api_key(api_key: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            base_url: DEFAULT_CHAT_URL.to_string(),
            model,
        }
    }

    /// Override the endpoint URL (self-hosted gateways, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the per-call deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = Client::builder().timeout(timeout).build().unwrap_or_default();
        self
    }

    async fn generate_internal(&self, req: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        let model = req.model.clone().unwrap_or_else(|| self.model.clone());
        let body = dto::ChatCompletionRequest {
            model,
            messages: req.messages.iter().map(dto::to_api_message).collect(),
            max_tokens: req.max_tokens,
            temperature: req.temperature,
        };

        debug!(url = %self.base_url, messages = req.messages.len(), "Sending chat request");

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            let wait = retry_after_secs(response.headers());
            let body = response.text().await.unwrap_or_default();
            return Err(classify_response(status.as_u16(), wait, body));
        }

        let parsed: dto::ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::new(ProviderErrorKind::Parse(e.to_string())))?;

        let text = parsed
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| {
                ProviderError::new(ProviderErrorKind::Parse(
                    "response contained no message content".to_string(),
                ))
            })?;

        Ok(ChatResponse { text })
    }
}

#[async_trait]
impl TextDriver for OpenAiChatClient {
    #[instrument(skip(self, req), fields(provider = "openai", model = %self.model))]
    async fn generate(&self, req: &ChatRequest) -> StorybarnResult<ChatResponse> {
        self.generate_internal(req).await.map_err(Into::into)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

impl Vision for OpenAiChatClient {
    fn max_images_per_request(&self) -> usize {
        10
    }

    fn supported_image_formats(&self) -> &[&'static str] {
        &["image/png", "image/jpeg", "image/webp", "image/gif"]
    }
}
