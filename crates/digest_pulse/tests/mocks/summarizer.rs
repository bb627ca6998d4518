use std::sync::{Arc, Mutex};

use digest_pulse::Summarizer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizerCall {
    SummarizeOne { text: String },
    Refine { existing: String, text: String },
}

/// Builds summaries by tagging and joining its inputs so tests can see how
/// the running summary was threaded.
#[derive(Clone, Default)]
pub struct MockSummarizer {
    pub calls: Arc<Mutex<Vec<SummarizerCall>>>,
    /// Fail the n-th call (0 based) with this message
    pub fail_on_call: Option<(usize, String)>,
}

impl MockSummarizer {
    pub fn failing_on_call(n: usize, msg: &str) -> Self {
        Self {
            fail_on_call: Some((n, msg.to_string())),
            ..Default::default()
        }
    }

    fn record(&self, call: SummarizerCall) -> anyhow::Result<()> {
        let mut calls = self.calls.lock().unwrap();
        if let Some((n, ref msg)) = self.fail_on_call {
            if calls.len() == n {
                return Err(anyhow::anyhow!("{}", msg));
            }
        }
        calls.push(call);
        Ok(())
    }
}

impl Summarizer for MockSummarizer {
    type Error = anyhow::Error;

    async fn summarize_one(&self, text: &str) -> Result<String, Self::Error> {
        self.record(SummarizerCall::SummarizeOne {
            text: text.to_string(),
        })?;
        Ok(format!("S({text})"))
    }

    async fn refine(&self, existing_summary: &str, text: &str) -> Result<String, Self::Error> {
        self.record(SummarizerCall::Refine {
            existing: existing_summary.to_string(),
            text: text.to_string(),
        })?;
        Ok(format!("R({existing_summary}|{text})"))
    }
}
