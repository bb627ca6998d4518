use std::path::PathBuf;

use async_trait::async_trait;

use crate::{Document, DocumentSource, FetchError};

/// Loads a UTF-8 text file from the local filesystem.
#[derive(Debug, Default, Clone)]
pub struct FileLoader;

#[async_trait]
impl DocumentSource for FileLoader {
    #[tracing::instrument(skip(self))]
    async fn load(&self, source: &str) -> Result<Document, FetchError> {
        let path = PathBuf::from(source);
        let content = tokio::fs::read_to_string(&path)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to read document file"))
            .map_err(|e| FetchError::Io { path, source: e })?;

        tracing::debug!(chars = content.chars().count(), "Loaded document file");
        Ok(Document::new(content, source))
    }
}
