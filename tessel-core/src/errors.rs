use thiserror::Error;
use tokio::task::JoinError;

#[derive(Error, Debug)]
pub enum LoaderError {
    /// The source was reachable but returned no content at all
    #[error("can't access URL {url}")]
    Access { url: String },

    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to chunk text {0}")]
    Chunking(anyhow::Error),

    #[error("failed to embed units {0}")]
    Embedding(anyhow::Error),

    #[error("loader task failed to finish {0}")]
    TaskFailed(#[from] JoinError),
}

impl LoaderError {
    pub fn access(url: impl Into<String>) -> Self {
        LoaderError::Access { url: url.into() }
    }

    pub fn fetch(url: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        LoaderError::Fetch {
            url: url.into(),
            source: source.into(),
        }
    }

    /// Returns true if the source could not be reached or had no content
    pub fn is_access_error(&self) -> bool {
        matches!(self, LoaderError::Access { .. } | LoaderError::Fetch { .. })
    }
}
