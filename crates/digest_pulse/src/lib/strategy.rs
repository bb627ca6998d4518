use std::{fmt, str::FromStr};

use doc_source::Document;

use crate::{chunker::Chunker, error::Error, refiner, Summarizer};

/// How a document is turned into a summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SummaryStrategy {
    /// One model call over the whole document, no chunking
    Stuff,
    /// Chunk the document, then fold the chunks into a running summary
    #[default]
    Refine,
}

impl SummaryStrategy {
    /// Applies the strategy to a non-empty document.
    #[tracing::instrument(skip_all, fields(strategy = %self, source = %document.source))]
    pub async fn apply<S: Summarizer>(
        &self,
        document: &Document,
        chunker: &Chunker,
        summarizer: &S,
    ) -> Result<String, Error> {
        match self {
            SummaryStrategy::Stuff => summarizer
                .summarize_one(&document.content)
                .await
                .map_err(|e| refiner::failed_at(0, e)),
            SummaryStrategy::Refine => {
                let chunks = chunker.split_document(document);
                tracing::info!(
                    chunks = chunks.len(),
                    max_size = chunker.max_size(),
                    overlap = chunker.overlap(),
                    "Split document into chunks"
                );
                refiner::summarize(&chunks, summarizer).await
            }
        }
    }
}

impl fmt::Display for SummaryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryStrategy::Stuff => f.write_str("stuff"),
            SummaryStrategy::Refine => f.write_str("refine"),
        }
    }
}

impl FromStr for SummaryStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stuff" => Ok(SummaryStrategy::Stuff),
            "refine" => Ok(SummaryStrategy::Refine),
            other => Err(Error::InvalidConfiguration(format!(
                "unknown summary strategy '{other}', expected 'stuff' or 'refine'"
            ))),
        }
    }
}
