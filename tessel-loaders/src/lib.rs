//! Loaders turn a source into text units ready for a language model
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod chunk_tokens;
pub mod web;

pub use chunk_tokens::{ChunkTokens, DEFAULT_MAX_TOKENS, TokenCounter};
