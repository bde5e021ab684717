//! Traits in Tessel allow for easy extendability
//!
//! Loaders are assembled from a fetcher that retrieves raw content, a chunker that splits
//! extracted text into units and, optionally, an embedding model. Bring your own by implementing
//! the trait.
use std::collections::HashMap;
use std::fmt::Debug;

use anyhow::Result;
use async_trait::async_trait;

use crate::errors::LoaderError;
use crate::text_unit::TextUnit;
use crate::type_aliases::Embeddings;

/// All traits are easily mockable under tests
#[cfg(feature = "test-utils")]
#[doc(hidden)]
use mockall::automock;

#[cfg_attr(feature = "test-utils", automock)]
#[async_trait]
/// Retrieves the raw (rendered) html of a page
///
/// Returns `Ok(None)` when the page was reached but had no content. Retries, if any, belong in
/// the implementation.
pub trait PageFetcher: Send + Sync + Debug {
    async fn fetch(&self, url: &str) -> Result<Option<String>>;
}

#[cfg_attr(feature = "test-utils", automock)]
/// Splits a text into sized units
pub trait Chunker: Send + Sync + Debug {
    fn chunk(&self, source: &str, text: &str) -> Result<Vec<TextUnit>>;
}

#[cfg_attr(feature = "test-utils", automock)]
#[async_trait]
/// Embeds a list of strings and returns their embeddings, in the same order.
pub trait EmbeddingModel: Send + Sync + Debug {
    async fn embed(&self, input: Vec<String>) -> Result<Embeddings>;
}

#[async_trait]
/// Loads text units from one or many sources
pub trait TextLoader: Send + Sync + Debug {
    /// Loads a single source. Errors if the source cannot be accessed.
    async fn load(&self, source: &str) -> Result<Vec<TextUnit>, LoaderError>;

    /// Loads many sources, keyed by [`crate::util::source_hash`] of each source.
    ///
    /// A failing source must not fail the others.
    async fn load_collection(&self, sources: &[String]) -> HashMap<String, Vec<TextUnit>>;
}
