use doc_source::FetchError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Summarization failed at chunk {chunk_index}: {cause:#}")]
    SummarizationFailed {
        chunk_index: usize,
        cause: anyhow::Error,
    },
}
