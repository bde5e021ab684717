//! This module defines the `TextUnit` struct and its associated methods.
//!
//! A `TextUnit` is one sized piece of text produced by a loader, together with the source it was
//! loaded from and any metadata collected along the way. Loaders split a flattened document into
//! one or more units, each small enough to hand to a language model.
use std::fmt::Debug;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::{Embedding, metadata::Metadata, util::debug_long_utf8};

/// A unit of text extracted from a source.
#[derive(Default, Clone, Serialize, Deserialize, PartialEq, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "anyhow::Error"))]
pub struct TextUnit {
    /// Where the text was loaded from, typically a url.
    #[builder(default)]
    pub source: String,
    /// The text itself.
    pub chunk: String,
    /// Metadata associated with the unit.
    #[builder(default)]
    pub metadata: Metadata,
    /// Size in bytes of the text this unit was split from
    #[builder(default)]
    pub original_size: usize,
    /// Offset in bytes of the chunk relative to the start of the text it was split from
    #[builder(default)]
    pub offset: usize,
    /// Embedding of the chunk, if the loader was given an embedding model.
    #[builder(default)]
    pub embedding: Option<Embedding>,
}

impl Debug for TextUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextUnit")
            .field("id", &self.id())
            .field("source", &self.source)
            .field("chunk", &debug_long_utf8(&self.chunk, 100))
            .field("metadata", &self.metadata)
            .field("offset", &self.offset)
            .field(
                "embedding_dimensions",
                &self.embedding.as_ref().map(Vec::len),
            )
            .finish()
    }
}

impl TextUnit {
    /// Creates a new instance of `TextUnitBuilder.`
    pub fn builder() -> TextUnitBuilder {
        TextUnitBuilder::default()
    }

    /// Creates a new unit with the given text and no source.
    pub fn new(chunk: impl Into<String>) -> TextUnit {
        let chunk = chunk.into();
        let original_size = chunk.len();
        TextUnit {
            chunk,
            original_size,
            ..Default::default()
        }
    }

    /// Retrieve the identifier of the unit.
    ///
    /// A UUID (v3) over the source and the chunk. Not memoized.
    pub fn id(&self) -> uuid::Uuid {
        let bytes = [self.source.as_bytes(), self.chunk.as_bytes()].concat();

        uuid::Uuid::new_v3(&uuid::Uuid::NAMESPACE_OID, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_debugging_unit_with_utf8_char_boundary() {
        let unit = TextUnit::new("🦀".repeat(101));
        let _ = format!("{unit:?}");

        let unit = TextUnit::new("Jürgen".repeat(100));
        let _ = format!("{unit:?}");
    }

    #[test]
    fn test_id_depends_on_source_and_chunk() {
        let a = TextUnit::builder()
            .source("https://a.example")
            .chunk("same")
            .build()
            .unwrap();
        let b = TextUnit::builder()
            .source("https://b.example")
            .chunk("same")
            .build()
            .unwrap();

        assert_ne!(a.id(), b.id());
        assert_eq!(a.id(), a.clone().id());
    }

    #[test]
    fn test_new_sets_original_size() {
        let unit = TextUnit::new("four");
        assert_eq!(unit.original_size, 4);
        assert_eq!(unit.offset, 0);
        assert!(unit.embedding.is_none());
    }

    #[test]
    fn test_builder_sets_embedding() {
        let unit = TextUnit::builder()
            .chunk("hello")
            .embedding(vec![0.0, 1.0])
            .build()
            .unwrap();

        assert_eq!(unit.embedding, Some(vec![0.0, 1.0]));
        assert!(format!("{unit:?}").contains("embedding_dimensions: Some(2)"));
    }
}
