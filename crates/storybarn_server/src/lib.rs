//! HTTP API server for Storybarn.
//!
//! The router is built over an explicitly constructed [`AppState`]; tests
//! instantiate their own state with scripted drivers, the binary wires the
//! real provider clients from configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod config;
mod envelope;
mod handlers;
mod state;

pub use app::create_router;
pub use config::{ProvidersConfig, ServerConfig, StorageConfig, StorybarnConfig};
pub use envelope::{ApiError, ErrorBody};
pub use state::AppState;
