//! OpenAI image-generations client.

use crate::openai::{
    classify_response, classify_transport, dto, retry_after_secs, DEFAULT_IMAGE_URL,
    DEFAULT_TIMEOUT_SECS,
};
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use std::time::Duration;
use storybarn_core::{ImagePayload, ImageRequest};
use storybarn_error::{ProviderError, ProviderErrorKind, StorybarnResult};
use storybarn_interface::ImageDriver;
use tracing::{debug, instrument};

/// Client for the OpenAI image-generations API.
///
/// Requests base64 payloads and returns them decoded; a decode failure is a
/// provider parse error, not a silent fallback.
#[derive(Debug, Clone)]
pub struct OpenAiImageClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiImageClient {
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
            base_url: DEFAULT_IMAGE_URL.to_string(),
            model,
        }
    }

    /// Override the endpoint URL (self-hosted gateways, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn generate_internal(&self, req: &ImageRequest) -> Result<ImagePayload, ProviderError> {
        let body = dto::ImageGenerationRequest {
            model: req.model.clone().unwrap_or_else(|| self.model.clone()),
            prompt: req.prompt.clone(),
            n: 1,
            size: req.size.clone(),
            response_format: "b64_json",
        };

        debug!(url = %self.base_url, prompt_len = req.prompt.len(), "Sending image request");

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

        let parsed: dto::ImageGenerationResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::new(ProviderErrorKind::Parse(e.to_string())))?;

        let datum = parsed.data.into_iter().next().ok_or_else(|| {
            ProviderError::new(ProviderErrorKind::Parse(
                "response contained no image data".to_string(),
            ))
        })?;

        let b64 = datum.b64_json.ok_or_else(|| {
            ProviderError::new(ProviderErrorKind::Parse(
                "response carried a URL instead of the requested base64 payload".to_string(),
            ))
        })?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(b64.as_bytes())
            .map_err(|e| {
                ProviderError::new(ProviderErrorKind::Parse(format!("base64 decode: {}", e)))
            })?;

        Ok(ImagePayload {
            bytes,
            mime: "image/png".to_string(),
        })
    }
}

#[async_trait]
impl ImageDriver for OpenAiImageClient {
    #[instrument(skip(self, req), fields(provider = "openai", model = %self.model))]
    async fn generate_image(&self, req: &ImageRequest) -> StorybarnResult<ImagePayload> {
        self.generate_internal(req).await.map_err(Into::into)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
