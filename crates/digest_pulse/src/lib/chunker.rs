//! # Chunker
//!
//! Splits long text into ordered, overlapping windows that fit a model's
//! input limit. Sizes are counted in `char`s so a window never cuts through a
//! UTF-8 sequence.

use doc_source::Document;

use crate::error::Error;

/// One window of the source text. `index` follows document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub index: usize,
    /// Number of chars shared with the previous chunk
    pub overlap_with_previous: usize,
}

/// Validated chunking parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    max_size: usize,
    overlap: usize,
}

impl Chunker {
    pub const DEFAULT_MAX_SIZE: usize = 2000;
    pub const DEFAULT_OVERLAP: usize = 200;

    /// Fails unless `max_size > 0` and `overlap < max_size`.
    pub fn new(max_size: usize, overlap: usize) -> Result<Self, Error> {
        if max_size == 0 {
            return Err(Error::InvalidConfiguration(
                "chunk max size must be greater than zero".into(),
            ));
        }
        if overlap >= max_size {
            return Err(Error::InvalidConfiguration(format!(
                "chunk overlap ({overlap}) must be smaller than max size ({max_size})"
            )));
        }
        Ok(Chunker { max_size, overlap })
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    pub fn split(&self, text: &str) -> Vec<Chunk> {
        // byte offset of every char, plus the end of the text
        let boundaries = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect::<Vec<_>>();
        let char_len = boundaries.len() - 1;
        let step = self.max_size - self.overlap;

        let mut chunks = Vec::new();
        let mut start = 0;
        let mut previous_end: usize = 0;

        while start < char_len {
            let end = (start + self.max_size).min(char_len);

            chunks.push(Chunk {
                text: text[boundaries[start]..boundaries[end]].to_string(),
                index: chunks.len(),
                overlap_with_previous: previous_end.saturating_sub(start),
            });

            if end == char_len {
                break;
            }
            previous_end = end;
            start += step;
        }

        chunks
    }

    pub fn split_document(&self, document: &Document) -> Vec<Chunk> {
        self.split(&document.content)
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Chunker {
            max_size: Self::DEFAULT_MAX_SIZE,
            overlap: Self::DEFAULT_OVERLAP,
        }
    }
}

/// Splits `text` into windows of at most `max_size` chars, each starting
/// `max_size - overlap` chars after the previous one.
pub fn chunk(text: &str, max_size: usize, overlap: usize) -> Result<Vec<Chunk>, Error> {
    Chunker::new(max_size, overlap).map(|chunker| chunker.split(text))
}
