use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use derive_builder::Builder;
use futures_util::{StreamExt as _, stream};
use tessel_core::{
    Chunker, EmbeddingModel, LoaderError, PageFetcher, TextLoader, TextUnit, util::source_hash,
};
use tessel_html::DocumentFlattener;
use tracing::Instrument as _;

use crate::ChunkTokens;

/// Loads web pages as text units.
///
/// Every page is fetched, flattened into plain text (see [`DocumentFlattener`]) and chunked into
/// units. Each unit records its `source` url and `source_hash` in the metadata. With an embedding
/// model configured, every unit of a page is embedded in a single batch.
///
/// A page that cannot be reached, or that has no content at all, is an access error. A page that
/// renders but has no extractable text yields no units.
///
/// # Example
///
/// ```no_run
/// # use tessel_core::TextLoader;
/// # use tessel_loaders::web::{HttpFetcher, WebLoader};
/// # async fn run() -> anyhow::Result<()> {
/// let loader = WebLoader::builder()
///     .fetcher(HttpFetcher::try_default()?)
///     .build()?;
///
/// let units = loader.load("https://example.com").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(error = "anyhow::Error"))]
pub struct WebLoader {
    /// Retrieves the html of a page.
    #[builder(setter(custom))]
    fetcher: Arc<dyn PageFetcher>,

    /// Turns the html into text.
    ///
    /// Defaults to a flattener with default options.
    #[builder(default)]
    flattener: DocumentFlattener,

    /// Splits the text into units.
    ///
    /// Defaults to [`ChunkTokens`] with its default token budget.
    #[builder(setter(custom), default = "self.default_chunker()?")]
    chunker: Arc<dyn Chunker>,

    /// Embeds the chunks of every page. No embeddings are computed when unset.
    #[builder(setter(custom), default)]
    embedding_model: Option<Arc<dyn EmbeddingModel>>,

    /// Maximum number of pages loaded at the same time by `load_collection`.
    ///
    /// Defaults to the number of cpus.
    #[builder(default = "num_cpus::get()")]
    concurrency: usize,
}

impl WebLoaderBuilder {
    pub fn fetcher(&mut self, fetcher: impl PageFetcher + 'static) -> &mut Self {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    pub fn chunker(&mut self, chunker: impl Chunker + 'static) -> &mut Self {
        self.chunker = Some(Arc::new(chunker));
        self
    }

    pub fn embedding_model(&mut self, model: impl EmbeddingModel + 'static) -> &mut Self {
        self.embedding_model = Some(Some(Arc::new(model)));
        self
    }

    fn default_chunker(&self) -> anyhow::Result<Arc<dyn Chunker>> {
        Ok(Arc::new(ChunkTokens::try_default()?))
    }
}

impl WebLoader {
    pub fn builder() -> WebLoaderBuilder {
        WebLoaderBuilder::default()
    }

    /// Loads many pages, keeping the outcome of every single one.
    ///
    /// Each page is loaded in its own task; a failing page does not affect the others. Results
    /// are keyed by [`source_hash`] of the url, in no particular order.
    pub async fn try_load_collection(
        &self,
        sources: &[String],
    ) -> HashMap<String, Result<Vec<TextUnit>, LoaderError>> {
        stream::iter(sources.iter().cloned())
            .map(|source| {
                let loader = self.clone();
                let key = source_hash(&source);
                let span = tracing::trace_span!("load_collection", source = %source);

                async move {
                    let result = tokio::spawn(
                        async move { loader.load(&source).await }.instrument(span.or_current()),
                    )
                    .await
                    .map_err(LoaderError::from)
                    .and_then(|result| result);

                    (key, result)
                }
            })
            .buffer_unordered(self.concurrency.max(1))
            .collect()
            .await
    }

    async fn embed(&self, units: &mut [TextUnit]) -> Result<(), LoaderError> {
        let Some(model) = &self.embedding_model else {
            return Ok(());
        };
        if units.is_empty() {
            return Ok(());
        }

        let embeddings = model
            .embed(units.iter().map(|unit| unit.chunk.clone()).collect())
            .await
            .map_err(LoaderError::Embedding)?;

        if embeddings.len() != units.len() {
            return Err(LoaderError::Embedding(anyhow::anyhow!(
                "expected {} embeddings, got {}",
                units.len(),
                embeddings.len()
            )));
        }

        for (unit, embedding) in units.iter_mut().zip(embeddings) {
            unit.embedding = Some(embedding);
        }

        Ok(())
    }

    async fn fetch_html(&self, url: &str) -> Result<String, LoaderError> {
        match self.fetcher.fetch(url).await {
            Ok(Some(html)) if !html.is_empty() => Ok(html),
            Ok(_) => Err(LoaderError::access(url)),
            Err(err) => Err(LoaderError::fetch(url, err)),
        }
    }
}

#[async_trait]
impl TextLoader for WebLoader {
    #[tracing::instrument(skip(self), name = "loaders.web.load", err)]
    async fn load(&self, source: &str) -> Result<Vec<TextUnit>, LoaderError> {
        let html = self.fetch_html(source).await?;
        let text = self.flattener.flatten_str(&html);

        tracing::debug!(
            html_bytes = html.len(),
            text_bytes = text.len(),
            "Flattened page"
        );

        if text.is_empty() {
            return Ok(Vec::new());
        }

        let mut units = self
            .chunker
            .chunk(source, &text)
            .map_err(LoaderError::Chunking)?;

        let hash = source_hash(source);
        for unit in &mut units {
            unit.metadata.insert("source", source);
            unit.metadata.insert("source_hash", hash.as_str());
        }

        self.embed(&mut units).await?;

        Ok(units)
    }

    /// Failed pages are logged and left out of the result
    #[tracing::instrument(skip_all, name = "loaders.web.load_collection", fields(sources = sources.len()))]
    async fn load_collection(&self, sources: &[String]) -> HashMap<String, Vec<TextUnit>> {
        self.try_load_collection(sources)
            .await
            .into_iter()
            .filter_map(|(key, result)| match result {
                Ok(units) => Some((key, units)),
                Err(err) => {
                    tracing::warn!(error = %err, key = %key, "Failed to load page, skipping");
                    None
                }
            })
            .collect()
    }
}
