use std::time::Duration;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use derive_builder::Builder;
use reqwest::StatusCode;
use tessel_core::PageFetcher;

const DEFAULT_USER_AGENT: &str = concat!("tessel/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Options for the http client used by [`HttpFetcher`]
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct HttpFetcherOptions {
    #[builder(default = "DEFAULT_USER_AGENT.to_string()")]
    pub user_agent: String,
    /// Total timeout of a single request, including reading the body
    #[builder(default = "DEFAULT_TIMEOUT")]
    pub timeout: Duration,
}

impl HttpFetcherOptions {
    pub fn builder() -> HttpFetcherOptionsBuilder {
        HttpFetcherOptionsBuilder::default()
    }
}

impl Default for HttpFetcherOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Fetches pages with a plain http GET.
///
/// Returns the html as served; pages that need javascript to render should use a fetcher backed
/// by a browser instead.
///
/// A `204 No Content` response is treated as a page without content. Other non-success status
/// codes are errors.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Builds a fetcher with its own client
    ///
    /// # Errors
    ///
    /// Errors if the http client cannot be built, i.e. when tls cannot be initialized
    pub fn try_new(options: &HttpFetcherOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&options.user_agent)
            .timeout(options.timeout)
            .build()
            .context("Failed to build http client")?;

        Ok(Self { client })
    }

    /// Builds a fetcher with default options
    ///
    /// # Errors
    ///
    /// Errors if the http client cannot be built
    pub fn try_default() -> Result<Self> {
        Self::try_new(&HttpFetcherOptions::default())
    }

    /// Uses an existing client, i.e. to share a connection pool
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    #[tracing::instrument(skip(self), name = "fetcher.http.fetch", err)]
    async fn fetch(&self, url: &str) -> Result<Option<String>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?
            .error_for_status()?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let html = response.text().await.context("Failed to read body")?;
        tracing::debug!(bytes = html.len(), "Fetched page");

        Ok(Some(html))
    }
}
