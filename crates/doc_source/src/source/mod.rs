use std::{fmt::Debug, path::PathBuf};

use async_trait::async_trait;

use crate::Document;

pub mod file;
pub mod url;
pub mod wikipedia;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Unexpected status {status} while fetching {url}")]
    Status { status: u16, url: String },
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that can turn a source identifier into a [`Document`].
///
/// Empty content is not an error; callers decide what an empty document means.
#[async_trait]
pub trait DocumentSource: Debug {
    async fn load(&self, source: &str) -> Result<Document, FetchError>;
}

#[async_trait]
impl<T: DocumentSource + Send + Sync + ?Sized> DocumentSource for Box<T> {
    async fn load(&self, source: &str) -> Result<Document, FetchError> {
        (**self).load(source).await
    }
}

#[async_trait]
impl<T: DocumentSource + Send + Sync + ?Sized> DocumentSource for &T {
    async fn load(&self, source: &str) -> Result<Document, FetchError> {
        (**self).load(source).await
    }
}
