pub mod document_source;
pub mod summarizer;
