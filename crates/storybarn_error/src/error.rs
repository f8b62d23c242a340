//! Top-level error wrapper types.

use crate::{
    ConfigError, JsonError, ProviderError, RepositoryError, RetryableError, StorageError,
    ValidationError,
};

/// The foundation error enum for the Storybarn workspace.
///
/// # Examples
///
/// ```
/// use storybarn_error::{StorybarnError, ValidationError};
///
/// let err: StorybarnError = ValidationError::single("theme", "theme is required").into();
/// assert!(format!("{}", err).contains("Validation"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StorybarnErrorKind {
    /// Malformed or incomplete input
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Generative provider failure
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Image storage failure
    #[from(StorageError)]
    Storage(StorageError),
    /// Repository failure
    #[from(RepositoryError)]
    Repository(RepositoryError),
    /// Configuration failure
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization failure
    #[from(JsonError)]
    Json(JsonError),
}

/// Storybarn error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storybarn_error::{StorybarnResult, RepositoryError};
///
/// fn lookup() -> StorybarnResult<()> {
///     Err(RepositoryError::not_found("image", 7))?
/// }
///
/// assert!(lookup().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storybarn Error: {}", _0)]
pub struct StorybarnError(Box<StorybarnErrorKind>);

impl StorybarnError {
    /// Create a new error from a kind.
    pub fn new(kind: StorybarnErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StorybarnErrorKind {
        &self.0
    }
}

impl RetryableError for StorybarnError {
    fn is_retryable(&self) -> bool {
        match self.kind() {
            StorybarnErrorKind::Provider(e) => e.is_retryable(),
            _ => false,
        }
    }

    fn retry_after_secs(&self) -> Option<u64> {
        match self.kind() {
            StorybarnErrorKind::Provider(e) => e.retry_after_secs(),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to StorybarnErrorKind
impl<T> From<T> for StorybarnError
where
    T: Into<StorybarnErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storybarn operations.
pub type StorybarnResult<T> = std::result::Result<T, StorybarnError>;
