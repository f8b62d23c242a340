//! The uniform failure envelope.
//!
//! Every failure leaving the HTTP boundary is
//! `{ error, message, retry?, retryAfterSeconds?, details? }` with a
//! human-readable message. Raw provider detail stays in the tracing log
//! and the provider journal.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use storybarn_error::{
    FieldIssue, ProviderErrorKind, RetryableError, StorageErrorKind, StorybarnError,
    StorybarnErrorKind,
};
use tracing::{error, warn};

/// The serialized failure body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Failure category: `validation_failed`, `provider_transient`,
    /// `provider_fatal`, `not_found`, `file_missing`, or `unexpected`
    pub error: String,
    /// Human-readable message, distinct from raw provider text
    pub message: String,
    /// Whether retrying the request may help (provider failures only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<bool>,
    /// Suggested wait before retrying, when the provider reported one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_seconds: Option<u64>,
    /// Field-level validation detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldIssue>>,
}

/// A failure ready to leave the HTTP boundary.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status
    pub status: StatusCode,
    /// Envelope body
    pub body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, category: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: category.to_string(),
                message: message.into(),
                retry: None,
                retry_after_seconds: None,
                details: None,
            },
        }
    }

    /// A 404 for a missing record.
    pub fn not_found(entity: &str, id: i32) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("No {} with id {}.", entity, id),
        )
    }

    /// A 400 for a request-level validation failure.
    pub fn validation(message: impl Into<String>, details: Vec<FieldIssue>) -> Self {
        let mut err = Self::new(StatusCode::BAD_REQUEST, "validation_failed", message);
        if !details.is_empty() {
            err.body.details = Some(details);
        }
        err
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<StorybarnError> for ApiError {
    fn from(err: StorybarnError) -> Self {
        match err.kind() {
            StorybarnErrorKind::Validation(v) => {
                warn!(fields = %v.field_names(), "Request failed validation");
                ApiError::validation("Invalid parameters.", v.issues.clone())
            }
            StorybarnErrorKind::Provider(p) => {
                warn!(error = %p, "Provider failure");
                provider_error(p.kind.clone(), err.retry_after_secs())
            }
            StorybarnErrorKind::Repository(r) => {
                warn!(error = %r, "Repository lookup failed");
                let storybarn_error::RepositoryErrorKind::NotFound { entity, id } = &r.kind;
                ApiError::not_found(entity, *id)
            }
            StorybarnErrorKind::Storage(s) => match &s.kind {
                StorageErrorKind::FileMissing(path) => {
                    warn!(path = %path, "Image file missing on disk");
                    ApiError::new(
                        StatusCode::NOT_FOUND,
                        "file_missing",
                        "The image file is missing on disk.",
                    )
                }
                StorageErrorKind::InvalidPath(_) => {
                    warn!(error = %s, "Invalid storage path in request");
                    ApiError::new(
                        StatusCode::BAD_REQUEST,
                        "validation_failed",
                        "Invalid file or book identifier.",
                    )
                }
                _ => unexpected(&err),
            },
            _ => unexpected(&err),
        }
    }
}

fn unexpected(err: &StorybarnError) -> ApiError {
    // Full detail only lands in the server-side log.
    error!(error = %err, "Unexpected failure");
    let mut api = ApiError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        "unexpected",
        "Something went wrong on our end. Please try again.",
    );
    api.body.retry = Some(false);
    api
}

fn provider_error(kind: ProviderErrorKind, retry_after: Option<u64>) -> ApiError {
    if kind.is_retryable() {
        let (status, message) = match kind {
            ProviderErrorKind::RateLimited { .. } => (
                StatusCode::TOO_MANY_REQUESTS,
                "The story engine is busy. Please try again in a few moments.",
            ),
            _ => (
                StatusCode::BAD_GATEWAY,
                "The story engine hit a temporary problem. Please try again.",
            ),
        };
        let mut api = ApiError::new(status, "provider_transient", message);
        api.body.retry = Some(true);
        api.body.retry_after_seconds = retry_after;
        return api;
    }

    let message = match &kind {
        ProviderErrorKind::Auth(_) | ProviderErrorKind::MissingApiKey { .. } => {
            "The story engine rejected our credentials."
        }
        ProviderErrorKind::ContentPolicy(_) => {
            "The request was declined by the provider's content policy."
        }
        ProviderErrorKind::Oversized(_) => "The request was too large for the story engine.",
        _ => "The story engine could not handle this request.",
    };
    let mut api = ApiError::new(StatusCode::BAD_GATEWAY, "provider_fatal", message);
    api.body.retry = Some(false);
    api
}
