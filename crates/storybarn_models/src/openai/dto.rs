//! Wire types for the OpenAI HTTP API.

use base64::Engine;
use serde::{Deserialize, Serialize};
use storybarn_core::{ChatMessage, Content, MediaSource};

/// Chat-completions request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// One message on the wire. Text-only messages serialize as a plain string;
/// vision messages serialize as typed content parts.
#[derive(Debug, Clone, Serialize)]
pub struct ApiMessage {
    pub role: String,
    pub content: ApiContent,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ApiContent {
    Text(String),
    Parts(Vec<ApiContentPart>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ApiContentPart {
    Text { text: String },
    ImageUrl { image_url: ApiImageUrl },
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiImageUrl {
    pub url: String,
}

/// Chat-completions response body (the slice this service reads).
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ApiChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiChoice {
    pub message: ApiResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponseMessage {
    pub content: Option<String>,
}

/// Image-generations request body.
#[derive(Debug, Clone, Serialize)]
pub struct ImageGenerationRequest {
    pub model: String,
    pub prompt: String,
    pub n: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    pub response_format: &'static str,
}

/// Image-generations response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageGenerationResponse {
    pub data: Vec<ApiImageDatum>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiImageDatum {
    pub b64_json: Option<String>,
    pub url: Option<String>,
}

/// Convert a core message to the wire shape.
///
/// Messages with only text content collapse to a plain string; anything
/// carrying an image becomes a content-part array with images embedded as
/// `data:` URLs.
pub fn to_api_message(message: &ChatMessage) -> ApiMessage {
    let role = message.role.to_string();

    let has_media = message
        .content
        .iter()
        .any(|c| !matches!(c, Content::Text(_)));

    if !has_media {
        let text = message
            .content
            .iter()
            .filter_map(Content::as_text)
            .collect::<Vec<_>>()
            .join("\n");
        return ApiMessage {
            role,
            content: ApiContent::Text(text),
        };
    }

    let parts = message
        .content
        .iter()
        .map(|content| match content {
            Content::Text(text) => ApiContentPart::Text { text: text.clone() },
            Content::Image { mime, source } => ApiContentPart::ImageUrl {
                image_url: ApiImageUrl {
                    url: media_to_url(mime.as_deref(), source),
                },
            },
        })
        .collect();

    ApiMessage {
        role,
        content: ApiContent::Parts(parts),
    }
}

fn media_to_url(mime: Option<&str>, source: &MediaSource) -> String {
    let mime = mime.unwrap_or("image/png");
    match source {
        MediaSource::Url(url) => url.clone(),
        MediaSource::Base64(b64) => format!("data:{};base64,{}", mime, b64),
        MediaSource::Binary(bytes) => format!(
            "data:{};base64,{}",
            mime,
            base64::engine::general_purpose::STANDARD.encode(bytes)
        ),
    }
}
