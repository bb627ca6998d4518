//! # Refiner
//!
//! Sequential left fold over chunks: the first chunk is summarized, every
//! later chunk refines the running summary. Step `i + 1` consumes the output
//! of step `i`, so chunks are never processed concurrently.

use crate::{chunker::Chunk, error::Error, Summarizer};

/// Accumulator owned by a single refine run.
#[derive(Debug, Default)]
pub struct SummaryState {
    pub running_summary: String,
    pub chunks_processed: usize,
}

impl SummaryState {
    fn advance(&mut self, summary: String) {
        self.running_summary = summary;
        self.chunks_processed += 1;
    }
}

/// Folds `chunks` into a single summary.
///
/// Returns an empty summary without calling the delegate when `chunks` is
/// empty. The first delegate failure aborts the run; no partial summary is
/// returned and nothing is retried.
#[tracing::instrument(skip_all, fields(chunks = chunks.len()))]
pub async fn summarize<S: Summarizer>(chunks: &[Chunk], summarizer: &S) -> Result<String, Error> {
    let Some((first, rest)) = chunks.split_first() else {
        tracing::debug!("No chunks to summarize");
        return Ok(String::new());
    };

    let mut state = SummaryState::default();

    let summary = summarizer
        .summarize_one(&first.text)
        .await
        .map_err(|e| failed_at(first.index, e))?;
    state.advance(summary);

    for chunk in rest {
        tracing::debug!(
            chunk_index = chunk.index,
            processed = state.chunks_processed,
            "Refining summary"
        );
        let summary = summarizer
            .refine(&state.running_summary, &chunk.text)
            .await
            .map_err(|e| failed_at(chunk.index, e))?;
        state.advance(summary);
    }

    tracing::info!(chunks_processed = state.chunks_processed, "Refine run complete");
    Ok(state.running_summary)
}

pub(crate) fn failed_at(chunk_index: usize, e: impl Into<anyhow::Error>) -> Error {
    let cause = e.into();
    tracing::error!(chunk_index, error = %cause, "Summarization delegate failed");
    Error::SummarizationFailed { chunk_index, cause }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::chunker::chunk;

    /// Echoes its last argument and records every call.
    #[derive(Default)]
    struct EchoSummarizer {
        calls: Mutex<Vec<(&'static str, String)>>,
        fail_on_call: Option<usize>,
    }

    impl EchoSummarizer {
        fn failing_on_call(n: usize) -> Self {
            Self {
                fail_on_call: Some(n),
                ..Default::default()
            }
        }

        fn record(&self, op: &'static str, text: &str) -> anyhow::Result<String> {
            let mut calls = self.calls.lock().unwrap();
            if self.fail_on_call == Some(calls.len()) {
                anyhow::bail!("model unavailable");
            }
            calls.push((op, text.to_string()));
            Ok(text.to_string())
        }

        fn count(&self, op: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|(o, _)| *o == op)
                .count()
        }
    }

    impl Summarizer for EchoSummarizer {
        type Error = anyhow::Error;

        async fn summarize_one(&self, text: &str) -> anyhow::Result<String> {
            self.record("summarize_one", text)
        }

        async fn refine(&self, _existing_summary: &str, text: &str) -> anyhow::Result<String> {
            self.record("refine", text)
        }
    }

    /// Joins the running summary and the new text so threading is visible.
    struct JoiningSummarizer;

    impl Summarizer for JoiningSummarizer {
        type Error = anyhow::Error;

        async fn summarize_one(&self, text: &str) -> anyhow::Result<String> {
            Ok(format!("[{text}]"))
        }

        async fn refine(&self, existing_summary: &str, text: &str) -> anyhow::Result<String> {
            Ok(format!("{existing_summary}+{text}"))
        }
    }

    fn three_chunks() -> Vec<Chunk> {
        chunk("aaaabbbbcccc", 4, 0).unwrap()
    }

    #[tokio::test]
    async fn test_result_is_last_chunk_when_delegates_echo() {
        let chunks = three_chunks();
        let summarizer = EchoSummarizer::default();

        let summary = summarize(&chunks, &summarizer).await.unwrap();

        assert_eq!(summary, chunks[2].text);
        assert_eq!(summarizer.count("summarize_one"), 1);
        assert_eq!(summarizer.count("refine"), 2);
    }

    #[tokio::test]
    async fn test_running_summary_is_threaded_in_order() {
        let summary = summarize(&three_chunks(), &JoiningSummarizer)
            .await
            .unwrap();
        assert_eq!(summary, "[aaaa]+bbbb+cccc");
    }

    #[tokio::test]
    async fn test_failure_on_second_chunk_aborts() {
        let chunks = three_chunks();
        let summarizer = EchoSummarizer::failing_on_call(1);

        let result = summarize(&chunks, &summarizer).await;

        match result {
            Err(Error::SummarizationFailed { chunk_index, cause }) => {
                assert_eq!(chunk_index, 1);
                assert_eq!(cause.to_string(), "model unavailable");
            }
            other => panic!("expected SummarizationFailed, got {other:?}"),
        }
        assert_eq!(summarizer.count("summarize_one"), 1);
        assert_eq!(summarizer.count("refine"), 0);
    }

    #[tokio::test]
    async fn test_failure_on_first_chunk_reports_index_zero() {
        let summarizer = EchoSummarizer::failing_on_call(0);
        let result = summarize(&three_chunks(), &summarizer).await;
        assert!(matches!(
            result,
            Err(Error::SummarizationFailed { chunk_index: 0, .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_chunks_return_empty_summary_without_calls() {
        let summarizer = EchoSummarizer::default();
        let summary = summarize(&[], &summarizer).await.unwrap();

        assert_eq!(summary, "");
        assert!(summarizer.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_identical_chunks_are_summarized_every_time() {
        let chunks = chunk("abababab", 2, 0).unwrap();
        let summarizer = EchoSummarizer::default();

        summarize(&chunks, &summarizer).await.unwrap();

        assert_eq!(summarizer.calls.lock().unwrap().len(), 4);
    }

    #[test]
    fn test_failure_message_names_chunk() {
        let err = failed_at(3, anyhow::anyhow!("rate limited"));
        assert_eq!(
            err.to_string(),
            "Summarization failed at chunk 3: rate limited"
        );
    }
}
