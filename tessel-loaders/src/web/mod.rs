//! Load web pages as text units
//!
//! The [`WebLoader`] fetches pages with a [`tessel_core::PageFetcher`], flattens the html into
//! plain text and chunks the text. [`HttpFetcher`] fetches with a plain http GET.
mod http_fetcher;
mod loader;

pub use http_fetcher::{HttpFetcher, HttpFetcherOptions, HttpFetcherOptionsBuilder};
pub use loader::{WebLoader, WebLoaderBuilder};
