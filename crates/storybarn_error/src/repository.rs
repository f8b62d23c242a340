//! Repository error types.

/// Kinds of repository errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RepositoryErrorKind {
    /// No record with the given id
    #[display("{} {} not found", entity, id)]
    NotFound {
        /// Entity name, e.g. "story" or "image"
        entity: &'static str,
        /// The id that was looked up
        id: i32,
    },
}

/// Repository error with location tracking.
///
/// # Examples
///
/// ```
/// use storybarn_error::{RepositoryError, RepositoryErrorKind};
///
/// let err = RepositoryError::not_found("story", 42);
/// assert!(format!("{}", err).contains("story 42"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Repository Error: {} at line {} in {}", kind, line, file)]
pub struct RepositoryError {
    /// The kind of error that occurred
    pub kind: RepositoryErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RepositoryError {
    /// Create a new repository error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RepositoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for the not-found case.
    #[track_caller]
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::new(RepositoryErrorKind::NotFound { entity, id })
    }
}
