// src/pipeline.rs

use crate::chunker::split_into_chunks;
use crate::summarizer::{SummarizerError, SummaryProvider};
use thiserror::Error;
use tracing::{debug, info};

/// Tunables for a single document summarization run.
#[derive(Debug, Clone)]
pub struct SummaryOptions {
    /// Word budget per chunk handed to the model.
    pub max_words: usize,
    /// Upper length hint for each per-chunk summary.
    pub summary_max_length: usize,
    /// Lower length hint for each per-chunk summary.
    pub summary_min_length: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            max_words: 400,
            summary_max_length: 150,
            summary_min_length: 50,
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("summarization failed on chunk {index} of {total}: {source}")]
    Chunk {
        index: usize,
        total: usize,
        #[source]
        source: SummarizerError,
    },
}

/// Chunk the document, summarize each chunk strictly in order, and join the
/// per-chunk summaries with single spaces.
///
/// Empty input returns an empty summary without calling the provider. A
/// failure on any chunk aborts the whole document; no partial summary is
/// ever returned.
pub async fn summarize_document(
    text: &str,
    provider: &dyn SummaryProvider,
    opts: &SummaryOptions,
) -> Result<String, PipelineError> {
    let chunks = split_into_chunks(text, opts.max_words);
    if chunks.is_empty() {
        return Ok(String::new());
    }

    let total = chunks.len();
    info!(
        chunks = total,
        model = provider.model_name(),
        "Summarizing document"
    );

    let mut summaries = Vec::with_capacity(total);
    for (index, chunk) in chunks.iter().enumerate() {
        debug!(index, chunk_len = chunk.len(), "Summarizing chunk");
        let summary = provider
            .summarize(chunk, opts.summary_max_length, opts.summary_min_length)
            .await
            .map_err(|source| PipelineError::Chunk {
                index,
                total,
                source,
            })?;
        summaries.push(summary);
    }

    Ok(summaries.join(" "))
}
