//! # Tessel
//!
//! Tessel loads content for language model agents. Web pages are fetched, stripped of page chrome
//! (navigation, scripts, footers, cookie dialogs) and flattened into plain text that keeps the
//! structure a reader would see. The text is then split into units that fit a token budget.
//!
//! ## Example
//!
//! ```no_run
//! # use anyhow::Result;
//! # use tessel::traits::TextLoader as _;
//! # use tessel::loaders::web::{HttpFetcher, WebLoader};
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let loader = WebLoader::builder()
//!     .fetcher(HttpFetcher::try_default()?)
//!     .concurrency(4_usize)
//!     .build()?;
//!
//! let pages = loader
//!     .load_collection(&[
//!         "https://example.com".to_string(),
//!         "https://example.org".to_string(),
//!     ])
//!     .await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Flattening only
//!
//! ```
//! # use tessel::html::DocumentFlattener;
//! let text = DocumentFlattener::default()
//!     .flatten_str("<table><tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr></table>");
//!
//! assert_eq!(text, "a\tb\nc\td");
//! ```

#[doc(inline)]
pub use tessel_core::{
    Embedding, Embeddings, LoaderError, Metadata, TextUnit, TextUnitBuilder, util,
};

/// Common traits for fetching, chunking and loading
pub mod traits {
    #[doc(inline)]
    pub use tessel_core::loader_traits::*;
}

/// Turn html into structured plain text
pub mod html {
    #[doc(inline)]
    pub use tessel_html::*;
}

/// Loaders and the chunkers they use
pub mod loaders {
    #[doc(inline)]
    pub use tessel_loaders::*;
}

#[doc(hidden)]
#[cfg(feature = "test-utils")]
pub mod test_utils {
    pub use tessel_core::test_utils::*;
}
