//! OpenAI provider integration.
//!
//! Two clients share the wire plumbing in this module: the chat-completions
//! client (text generation and vision analysis) and the image-generations
//! client. Both map upstream failures into the provider error taxonomy at
//! the response boundary; retry happens one layer up in the generation
//! proxy.

mod chat;
mod dto;
mod image;

pub use chat::OpenAiChatClient;
pub use image::OpenAiImageClient;

use storybarn_error::{ProviderError, ProviderErrorKind};

/// Default chat-completions endpoint.
pub const DEFAULT_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Default image-generations endpoint.
pub const DEFAULT_IMAGE_URL: &str = "https://api.openai.com/v1/images/generations";
/// Default per-call deadline.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Classify a non-success HTTP response into the provider taxonomy.
///
/// Content-policy rejections arrive as 400s with a policy code in the body,
/// so they are sniffed before the generic status mapping.
fn classify_response(status: u16, retry_after_secs: Option<u64>, body: String) -> ProviderError {
    if status == 400
        && (body.contains("content_policy") || body.contains("safety system"))
    {
        return ProviderError::new(ProviderErrorKind::ContentPolicy(body));
    }
    ProviderError::new(ProviderErrorKind::from_status(status, body, retry_after_secs))
}

/// Map a reqwest transport failure into the provider taxonomy.
fn classify_transport(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::new(ProviderErrorKind::Timeout)
    } else {
        ProviderError::new(ProviderErrorKind::Network(err.to_string()))
    }
}

/// Parse a `retry-after` header value in seconds, when present.
fn retry_after_secs(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}
