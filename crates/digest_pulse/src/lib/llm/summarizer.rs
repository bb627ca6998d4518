use std::future::Future;

/// The model delegate driven by the refine fold.
///
/// Both operations may be slow and may fail; the caller only distinguishes
/// `Ok(summary)` from `Err(_)`.
pub trait Summarizer {
    type Error: Into<anyhow::Error>;

    /// Summarizes a single piece of text from scratch.
    fn summarize_one(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Folds `text` into an existing running summary.
    fn refine(
        &self,
        existing_summary: &str,
        text: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}
