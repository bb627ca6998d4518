use doc_source::{Document, DocumentSource};

use crate::{chunker::Chunker, error::Error, strategy::SummaryStrategy, Summarizer};

pub mod builder;

/// Loads a document and summarizes it with the configured strategy.
///
/// Holds no per-run state, so one processor can serve concurrent runs.
#[derive(Debug)]
pub struct DigestProcessor<Src, S>
where
    Src: DocumentSource + Send + Sync,
    S: Summarizer + Send + Sync,
{
    pub(crate) source: Src,
    pub(crate) summarizer: S,
    pub(crate) strategy: SummaryStrategy,
    pub(crate) chunker: Chunker,
}

impl<Src, S> DigestProcessor<Src, S>
where
    Src: DocumentSource + Send + Sync,
    S: Summarizer + Send + Sync,
{
    pub fn strategy(&self) -> SummaryStrategy {
        self.strategy
    }

    pub fn chunker(&self) -> &Chunker {
        &self.chunker
    }

    /// Loads `source_id` through the document source and summarizes it.
    #[tracing::instrument(skip(self), fields(strategy = %self.strategy))]
    pub async fn run(&self, source_id: &str) -> Result<String, Error> {
        let document = self
            .source
            .load(source_id)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to load document"))?;

        tracing::info!(chars = document.char_count(), "Loaded document");

        self.summarize_document(&document).await
    }

    /// Summarizes a document that is already loaded.
    ///
    /// Empty documents short circuit to an empty summary.
    pub async fn summarize_document(&self, document: &Document) -> Result<String, Error> {
        if document.is_empty() {
            tracing::info!(source = %document.source, "Document is empty, nothing to summarize");
            return Ok(String::new());
        }

        self.strategy
            .apply(document, &self.chunker, &self.summarizer)
            .await
    }
}
