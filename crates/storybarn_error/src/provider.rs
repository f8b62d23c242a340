//! Generative-provider error types and retry classification.

/// Provider-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProviderErrorKind {
    /// API key not found in environment
    #[display("{} API key environment variable not set", provider)]
    MissingApiKey {
        /// Provider name, e.g. "openai"
        provider: String,
    },
    /// Upstream rate limit hit (HTTP 429)
    #[display("Rate limited by provider (retry after {:?}s)", retry_after_secs)]
    RateLimited {
        /// Suggested wait before retrying, when the provider reported one
        retry_after_secs: Option<u64>,
    },
    /// Upstream returned a server-side failure
    #[display("Provider HTTP {} error: {}", status_code, message)]
    Upstream {
        /// HTTP status code
        status_code: u16,
        /// Error body or status text
        message: String,
    },
    /// The request did not complete within the call deadline
    #[display("Provider call timed out")]
    Timeout,
    /// Transport-level failure before a response arrived
    #[display("Network error: {}", _0)]
    Network(String),
    /// Response arrived but did not match the expected shape
    #[display("Failed to parse provider response: {}", _0)]
    Parse(String),
    /// Authentication rejected (HTTP 401/403)
    #[display("Provider authentication failed: {}", _0)]
    Auth(String),
    /// Request rejected by the provider's content policy
    #[display("Request rejected by content policy: {}", _0)]
    ContentPolicy(String),
    /// Input exceeded the provider's size limits
    #[display("Input too large for provider: {}", _0)]
    Oversized(String),
    /// Request malformed before it left this service
    #[display("Invalid provider request: {}", _0)]
    InvalidRequest(String),
}

impl ProviderErrorKind {
    /// Check if this error type should be retried.
    ///
    /// Rate limits, upstream 5xx failures, timeouts, network faults, and
    /// parse failures are transient (a fresh completion can parse cleanly).
    /// Authentication, content-policy, and oversized-input rejections never
    /// recover by retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderErrorKind::RateLimited { .. }
                | ProviderErrorKind::Upstream { .. }
                | ProviderErrorKind::Timeout
                | ProviderErrorKind::Network(_)
                | ProviderErrorKind::Parse(_)
        )
    }

    /// Suggested wait before the next attempt, when the provider reported one.
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            ProviderErrorKind::RateLimited { retry_after_secs } => *retry_after_secs,
            _ => None,
        }
    }

    /// Classify an HTTP status code from a provider response body.
    ///
    /// 429 becomes [`ProviderErrorKind::RateLimited`], 5xx and 408 become
    /// [`ProviderErrorKind::Upstream`], 401/403 become
    /// [`ProviderErrorKind::Auth`], and 413 becomes
    /// [`ProviderErrorKind::Oversized`]. Anything else is an invalid request.
    pub fn from_status(status_code: u16, message: String, retry_after_secs: Option<u64>) -> Self {
        match status_code {
            429 => ProviderErrorKind::RateLimited { retry_after_secs },
            408 | 500..=599 => ProviderErrorKind::Upstream {
                status_code,
                message,
            },
            401 | 403 => ProviderErrorKind::Auth(message),
            413 => ProviderErrorKind::Oversized(message),
            _ => ProviderErrorKind::InvalidRequest(format!("HTTP {}: {}", status_code, message)),
        }
    }
}

/// Provider error with source location tracking.
///
/// # Examples
///
/// ```
/// use storybarn_error::{ProviderError, ProviderErrorKind, RetryableError};
///
/// let err = ProviderError::new(ProviderErrorKind::RateLimited {
///     retry_after_secs: Some(20),
/// });
/// assert!(err.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Trait for errors that support retry classification.
///
/// Transient errors like 503 (service unavailable), 429 (rate limit), or
/// network timeouts should return true. Permanent errors like 401
/// (unauthorized) or content-policy rejections should return false.
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;

    /// Suggested wait before the next attempt, if the upstream reported one.
    fn retry_after_secs(&self) -> Option<u64> {
        None
    }
}

impl RetryableError for ProviderError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    fn retry_after_secs(&self) -> Option<u64> {
        self.kind.retry_after_secs()
    }
}
