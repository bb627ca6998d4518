use doc_source::DocumentSource;

use crate::{
    chunker::Chunker, error::Error, strategy::SummaryStrategy, DigestProcessor, Summarizer,
};

#[derive(Debug, Clone, Copy)]
pub struct ChunkingConfig {
    pub max_size: usize,
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_size: Chunker::DEFAULT_MAX_SIZE,
            overlap: Chunker::DEFAULT_OVERLAP,
        }
    }
}

pub struct DigestProcessorBuilder<Src = (), S = ()> {
    source: Src,
    summarizer: S,
    strategy: SummaryStrategy,
    chunking_config: ChunkingConfig,
}

impl DigestProcessorBuilder {
    pub fn new() -> Self {
        Self {
            source: (),
            summarizer: (),
            strategy: SummaryStrategy::default(),
            chunking_config: ChunkingConfig::default(),
        }
    }
}

impl Default for DigestProcessorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<Src, S> DigestProcessorBuilder<Src, S> {
    pub fn source<Src2: DocumentSource + Send + Sync>(
        self,
        source: Src2,
    ) -> DigestProcessorBuilder<Src2, S> {
        DigestProcessorBuilder {
            source,
            summarizer: self.summarizer,
            strategy: self.strategy,
            chunking_config: self.chunking_config,
        }
    }

    pub fn summarizer<S2: Summarizer + Send + Sync>(
        self,
        summarizer: S2,
    ) -> DigestProcessorBuilder<Src, S2> {
        DigestProcessorBuilder {
            source: self.source,
            summarizer,
            strategy: self.strategy,
            chunking_config: self.chunking_config,
        }
    }

    pub fn strategy(mut self, strategy: SummaryStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_chunking(mut self, max_size: usize, overlap: usize) -> Self {
        self.chunking_config = ChunkingConfig { max_size, overlap };
        self
    }
}

impl<Src, S> DigestProcessorBuilder<Src, S>
where
    Src: DocumentSource + Send + Sync,
    S: Summarizer + Send + Sync,
{
    /// Fails with [`Error::InvalidConfiguration`] before any I/O when the
    /// chunking parameters are out of range.
    pub fn build(self) -> Result<DigestProcessor<Src, S>, Error> {
        let ChunkingConfig { max_size, overlap } = self.chunking_config;
        let chunker = Chunker::new(max_size, overlap)
            .inspect_err(|e| tracing::error!(error = %e, "Rejected chunking configuration"))?;

        Ok(DigestProcessor {
            source: self.source,
            summarizer: self.summarizer,
            strategy: self.strategy,
            chunker,
        })
    }
}
