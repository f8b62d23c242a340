//! Error types for the Storybarn service.
//!
//! This crate provides the foundation error types used throughout the
//! Storybarn workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use storybarn_error::{StorybarnResult, ProviderError, ProviderErrorKind};
//!
//! fn call_provider() -> StorybarnResult<String> {
//!     Err(ProviderError::new(ProviderErrorKind::Timeout))?
//! }
//!
//! match call_provider() {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod json;
mod provider;
mod repository;
mod storage;
mod validation;

pub use config::ConfigError;
pub use error::{StorybarnError, StorybarnErrorKind, StorybarnResult};
pub use json::JsonError;
pub use provider::{ProviderError, ProviderErrorKind, RetryableError};
pub use repository::{RepositoryError, RepositoryErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use validation::{FieldIssue, ValidationError};
