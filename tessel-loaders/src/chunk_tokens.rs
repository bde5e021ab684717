//! Chunk text into pieces bounded by a token budget
use std::sync::Arc;

use anyhow::Result;
use tessel_core::{Chunker, TextUnit};
use text_splitter::{ChunkConfig, ChunkSizer, TextSplitter};
use tiktoken_rs::{CoreBPE, cl100k_base, get_bpe_from_model};

/// Default maximum number of tokens per unit
pub const DEFAULT_MAX_TOKENS: usize = 400;

/// Counts tokens with a tiktoken encoding.
///
/// Counts are exact for openai models and a reasonable estimate for others.
#[derive(Clone)]
pub struct TokenCounter {
    bpe: Arc<CoreBPE>,
}

impl std::fmt::Debug for TokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCounter").finish()
    }
}

impl TokenCounter {
    /// Uses the `cl100k_base` encoding
    ///
    /// # Errors
    ///
    /// Errors if the encoding cannot be built
    pub fn try_cl100k() -> Result<Self> {
        Ok(Self {
            bpe: Arc::new(cl100k_base()?),
        })
    }

    /// Uses the encoding of an openai model, i.e. `gpt-4o`
    ///
    /// # Errors
    ///
    /// Errors if the model is unknown or the encoding cannot be built
    pub fn try_from_model(model: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            bpe: Arc::new(get_bpe_from_model(model.as_ref())?),
        })
    }

    pub fn count(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }
}

impl ChunkSizer for TokenCounter {
    fn size(&self, chunk: &str) -> usize {
        self.count(chunk)
    }
}

/// Splits text into units of at most `max_tokens` tokens.
///
/// Prefers semantic boundaries (paragraphs, sentences, words) over hard cuts; uses
/// `text_splitter` under the hood. Whitespace-only chunks are dropped.
///
/// # Example
///
/// ```no_run
/// # use tessel_core::Chunker;
/// # use tessel_loaders::ChunkTokens;
/// # fn main() -> anyhow::Result<()> {
/// let chunker = ChunkTokens::try_from_max_tokens(50)?;
/// let units = chunker.chunk("https://example.com", "A long text")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ChunkTokens {
    max_tokens: usize,
    counter: TokenCounter,
    splitter: Arc<TextSplitter<TokenCounter>>,
}

impl std::fmt::Debug for ChunkTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkTokens")
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl ChunkTokens {
    /// Creates a chunker with the given counter and budget
    pub fn new(max_tokens: usize, counter: TokenCounter) -> Self {
        let config = ChunkConfig::new(max_tokens).with_sizer(counter.clone());

        Self {
            max_tokens,
            counter,
            splitter: Arc::new(TextSplitter::new(config)),
        }
    }

    /// Creates a chunker counting `cl100k_base` tokens
    ///
    /// # Errors
    ///
    /// Errors if the encoding cannot be built
    pub fn try_from_max_tokens(max_tokens: usize) -> Result<Self> {
        Ok(Self::new(max_tokens, TokenCounter::try_cl100k()?))
    }

    /// Creates a chunker with [`DEFAULT_MAX_TOKENS`] counting `cl100k_base` tokens
    ///
    /// # Errors
    ///
    /// Errors if the encoding cannot be built
    pub fn try_default() -> Result<Self> {
        Self::try_from_max_tokens(DEFAULT_MAX_TOKENS)
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    pub fn counter(&self) -> &TokenCounter {
        &self.counter
    }
}

impl Chunker for ChunkTokens {
    #[tracing::instrument(skip_all, name = "chunker.tokens", fields(source = source))]
    fn chunk(&self, source: &str, text: &str) -> Result<Vec<TextUnit>> {
        self.splitter
            .chunk_indices(text)
            .filter(|(_, chunk)| !chunk.trim().is_empty())
            .map(|(offset, chunk)| {
                TextUnit::builder()
                    .source(source)
                    .chunk(chunk)
                    .original_size(text.len())
                    .offset(offset)
                    .build()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    const TEXT: &str = indoc! {"
        Tessel flattens web pages into plain text.
        The text is then split into units that fit a token budget.
        - lists stay readable
        - and so do tables
    "};

    #[test]
    fn test_short_text_is_a_single_unit() {
        let chunker = ChunkTokens::try_default().unwrap();

        let units = chunker.chunk("https://example.com", "foobar").unwrap();

        assert_eq!(units.len(), 1);
        assert_eq!(units[0].chunk, "foobar");
        assert_eq!(units[0].source, "https://example.com");
        assert_eq!(units[0].offset, 0);
        assert_eq!(units[0].original_size, 6);
    }

    #[test]
    fn test_units_stay_within_budget() {
        let chunker = ChunkTokens::try_from_max_tokens(10).unwrap();

        let units = chunker.chunk("source", TEXT).unwrap();

        assert!(units.len() > 1);
        for unit in &units {
            assert!(
                chunker.counter().count(&unit.chunk) <= 10,
                "{unit:?} exceeds the budget"
            );
            assert_eq!(&TEXT[unit.offset..unit.offset + unit.chunk.len()], unit.chunk);
        }
    }

    #[test]
    fn test_empty_text_has_no_units() {
        let chunker = ChunkTokens::try_default().unwrap();

        assert!(chunker.chunk("source", "   \n ").unwrap().is_empty());
    }

    #[test]
    fn test_from_model() {
        let counter = TokenCounter::try_from_model("gpt-4o").unwrap();
        assert!(counter.count("hello world") > 0);

        assert!(TokenCounter::try_from_model("not-a-model").is_err());
    }
}
