/// A loaded document, already reduced to plain text.
///
/// Produced once by a [`DocumentSource`](crate::DocumentSource) and never
/// mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub content: String,
    /// Where the content came from (URL or file path)
    pub source: String,
}

impl Document {
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        Document {
            content: content.into(),
            source: source.into(),
        }
    }

    /// Whitespace-only content counts as empty.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}
