//! Trait definitions for Storybarn generative providers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ImageDriver, TextDriver, Vision};
