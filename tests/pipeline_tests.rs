use async_trait::async_trait;
use condense::pipeline::{summarize_document, PipelineError, SummaryOptions};
use condense::summarizer::{SummarizerError, SummaryProvider};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Deterministic provider: tags each call with its sequence number and the
/// first word of the chunk, and optionally fails on a chosen call.
struct EchoProvider {
    calls: AtomicUsize,
    fail_on: Option<usize>,
}

impl EchoProvider {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_on: None,
        }
    }

    fn failing_on(call: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_on: Some(call),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SummaryProvider for EchoProvider {
    async fn summarize(
        &self,
        text: &str,
        _max_length: usize,
        _min_length: usize,
    ) -> Result<String, SummarizerError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on == Some(n) {
            return Err(SummarizerError::GenerationFailed("boom".to_string()));
        }
        let first = text.split_whitespace().next().unwrap_or("");
        Ok(format!("s{}[{}]", n, first))
    }

    fn model_name(&self) -> &str {
        "echo"
    }
}

fn long_sentence(word: &str, count: usize) -> String {
    vec![word; count].join(" ")
}

#[tokio::test]
async fn empty_text_returns_empty_summary_without_calling_provider() {
    let provider = EchoProvider::new();
    let summary = summarize_document("", &provider, &SummaryOptions::default())
        .await
        .expect("empty input must not fail");
    assert_eq!(summary, "");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn short_document_is_summarized_as_a_single_chunk() {
    let provider = EchoProvider::new();
    let summary = summarize_document("A. B. C.", &provider, &SummaryOptions::default())
        .await
        .expect("summarization failed");
    assert_eq!(summary, "s0[A.]");
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn chunk_summaries_are_joined_in_document_order() {
    let provider = EchoProvider::new();
    let text = format!(
        "{}. {}.",
        long_sentence("alpha", 300),
        long_sentence("beta", 300)
    );
    let summary = summarize_document(&text, &provider, &SummaryOptions::default())
        .await
        .expect("summarization failed");
    assert_eq!(summary, "s0[alpha] s1[beta]");
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn failure_on_one_chunk_fails_the_whole_document() {
    let provider = EchoProvider::failing_on(1);
    let text = format!(
        "{}. {}. {}.",
        long_sentence("alpha", 300),
        long_sentence("beta", 300),
        long_sentence("gamma", 300)
    );
    let err = summarize_document(&text, &provider, &SummaryOptions::default())
        .await
        .expect_err("second chunk failure must abort");

    let PipelineError::Chunk { index, total, .. } = err;
    assert_eq!(index, 1);
    assert_eq!(total, 3);
    // No further chunks are attempted after the failure
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn length_hints_default_to_reference_values() {
    let opts = SummaryOptions::default();
    assert_eq!(opts.max_words, 400);
    assert_eq!(opts.summary_max_length, 150);
    assert_eq!(opts.summary_min_length, 50);
}
