//! Validation error types.

use serde::{Deserialize, Serialize};

/// A single field-level validation problem.
///
/// Serializable so the HTTP layer can echo the offending fields back to the
/// caller in the `details` array of the failure envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[display("{}: {}", field, message)]
pub struct FieldIssue {
    /// Dotted path of the offending field, e.g. `antagonist.kind`
    pub field: String,
    /// Human-readable description of the problem
    pub message: String,
}

impl FieldIssue {
    /// Create a new field issue.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validation error carrying field-level detail and source location.
///
/// # Examples
///
/// ```
/// use storybarn_error::{FieldIssue, ValidationError};
///
/// let err = ValidationError::new(vec![FieldIssue::new("theme", "theme is required")]);
/// assert!(format!("{}", err).contains("theme"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation failed: {} issue(s) at line {} in {}", issues.len(), line, file)]
pub struct ValidationError {
    /// The individual field problems
    pub issues: Vec<FieldIssue>,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with automatic location tracking.
    #[track_caller]
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            issues,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Convenience constructor for a single-field failure.
    #[track_caller]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![FieldIssue::new(field, message)])
    }

    /// Names of the offending fields, joined for log lines.
    pub fn field_names(&self) -> String {
        self.issues
            .iter()
            .map(|i| i.field.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
