#![allow(clippy::missing_panics_doc)]
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use crate::PageFetcher;

/// A fetcher serving fixed pages per url, recording every url it was asked for.
///
/// Urls without a page fail like an unreachable host would.
#[derive(Debug, Clone, Default)]
pub struct FixturePageFetcher {
    pages: HashMap<String, Option<String>>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl FixturePageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), Some(html.into()));
        self
    }

    /// Registers a url that is reachable but renders no content
    #[must_use]
    pub fn with_absent_page(mut self, url: impl Into<String>) -> Self {
        self.pages.insert(url.into(), None);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for FixturePageFetcher {
    async fn fetch(&self, url: &str) -> Result<Option<String>> {
        self.requested.lock().unwrap().push(url.to_string());

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no fixture for {url}"))
    }
}
