// Summarization provider abstraction - pluggable architecture
// Default: abstractive model served by Ollama

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Configuration for the model backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SummarizerConfig {
    pub ollama_url: String,
    pub model: String,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            ollama_url: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
        }
    }
}

/// Error types for summarization operations
#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("summarizer connection failed: {0}")]
    ConnectionFailed(String),
    #[error("invalid summarizer response: {0}")]
    InvalidResponse(String),
    #[error("summary generation failed: {0}")]
    GenerationFailed(String),
}

/// Summarization capability - implement this to support new model backends.
#[async_trait::async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Produce an abstractive summary of `text`, aiming for a length between
    /// `min_length` and `max_length` words. The bounds are best-effort hints;
    /// model output is not re-validated against them.
    async fn summarize(
        &self,
        text: &str,
        max_length: usize,
        min_length: usize,
    ) -> Result<String, SummarizerError>;

    fn model_name(&self) -> &str;
}

/// Ollama-based summary provider
pub struct OllamaProvider {
    url: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    num_predict: i64,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

impl OllamaProvider {
    pub fn new(url: String, model: String) -> Self {
        Self {
            url,
            model,
            client: reqwest::Client::new(),
        }
    }

    pub async fn health_check(&self) -> Result<(), SummarizerError> {
        let health_url = format!("{}/api/tags", self.url);
        self.client.get(&health_url).send().await.map_err(|e| {
            SummarizerError::ConnectionFailed(format!(
                "Cannot reach Ollama at {}: {}",
                self.url, e
            ))
        })?;
        Ok(())
    }

    fn build_prompt(text: &str, max_length: usize, min_length: usize) -> String {
        format!(
            "Summarize the following text in between {} and {} words. \
             Respond with the summary only.\n\n{}",
            min_length, max_length, text
        )
    }
}

#[async_trait::async_trait]
impl SummaryProvider for OllamaProvider {
    async fn summarize(
        &self,
        text: &str,
        max_length: usize,
        min_length: usize,
    ) -> Result<String, SummarizerError> {
        debug!(model = %self.model, text_len = text.len(), "Requesting summary from Ollama");

        let url = format!("{}/api/generate", self.url);
        let req = OllamaRequest {
            model: self.model.clone(),
            prompt: Self::build_prompt(text, max_length, min_length),
            stream: false,
            // num_predict caps tokens, not words; leave headroom over max_length
            options: OllamaOptions {
                num_predict: (max_length * 2) as i64,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&req)
            .send()
            .await
            .map_err(|e| SummarizerError::ConnectionFailed(e.to_string()))?;

        let ollama_resp: OllamaResponse = response
            .json()
            .await
            .map_err(|e| SummarizerError::InvalidResponse(e.to_string()))?;

        let summary = ollama_resp.response.trim().to_string();
        if summary.is_empty() {
            return Err(SummarizerError::GenerationFailed(
                "model returned an empty summary".to_string(),
            ));
        }

        info!(model = %self.model, summary_len = summary.len(), "Summary generated");
        Ok(summary)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Build the process-wide provider. Constructed once at startup and shared by
/// every request; a failed health check is logged rather than fatal, so the
/// service can come up before the model does.
pub async fn create_provider(config: SummarizerConfig) -> Arc<dyn SummaryProvider> {
    info!(
        "Initializing summarizer model {} via Ollama at {}",
        config.model, config.ollama_url
    );
    let provider = OllamaProvider::new(config.ollama_url, config.model);
    if let Err(e) = provider.health_check().await {
        warn!("Ollama health check failed: {}. Make sure it's running: ollama serve", e);
    }
    Arc::new(provider)
}
