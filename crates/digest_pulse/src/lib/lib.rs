pub mod chunker;
mod error;
mod llm;
mod processor;
pub mod refiner;
pub mod strategy;
pub mod tracing;

pub use chunker::{chunk, Chunk, Chunker};
pub use error::Error;
pub use llm::openai;
pub use llm::summarizer::Summarizer;
pub use processor::{
    builder::{ChunkingConfig, DigestProcessorBuilder},
    DigestProcessor,
};
pub use refiner::{summarize, SummaryState};
pub use strategy::SummaryStrategy;

pub use doc_source::{Document, DocumentSource, FetchError, FileLoader, UrlLoader, WikipediaSource};
