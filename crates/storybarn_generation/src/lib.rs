//! The generation proxy: accepts a validated configuration and produces a
//! persisted story or image by delegating to exactly one external
//! generative provider.
//!
//! The proxy owns prompt assembly, the bounded retry schedule, response
//! extraction, and persistence. Provider clients classify their own
//! failures; this crate decides what to do with the classification.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extraction;
mod prompt;
mod retry;
mod weaver;

pub use extraction::{extract_json, parse_json};
pub use prompt::{
    analysis_brief, dalle_prompt, illustration_prompt, narrative_brief, story_prompt,
};
pub use retry::RetryPolicy;
pub use weaver::{IllustrationSpec, StoryWeaver};
