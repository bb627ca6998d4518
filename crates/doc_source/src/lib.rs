//! # Document sources
//!
//! This crate provides the ingestion side of digest-pulse: loading a web page,
//! a local text file or a Wikipedia search and handing it over as a plain-text [`Document`].
//!
//! Sources are exposed behind the object-safe [`DocumentSource`] trait so that
//! a host application can pick one at runtime.

mod document;
pub mod html;
mod source;

pub use document::Document;
pub use source::file::FileLoader;
pub use source::url::UrlLoader;
pub use source::wikipedia::WikipediaSource;
pub use source::{DocumentSource, FetchError};
