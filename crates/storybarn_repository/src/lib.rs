//! Story and image repositories for Storybarn.
//!
//! Repositories hand out auto-incrementing integer ids and keep insertion
//! order. The in-memory implementations are the reference backing store
//! (process lifetime); the traits are the seam a durable backend plugs
//! into without changing the id/field contract.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod memory;
mod traits;

pub use memory::{MemoryImageRepository, MemoryStoryRepository};
pub use traits::{ImageRepository, StoryRepository};
