// src/config.rs
use crate::pipeline::SummaryOptions;
use crate::summarizer::SummarizerConfig;
use std::env;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub upload_dir: String,
    pub summary_dir: String,
    pub chunk_max_words: usize,
    pub summary_max_length: usize,
    pub summary_min_length: usize,
    pub ollama_url: String,
    pub summary_model: String,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("BACKEND_PORT")
            .unwrap_or_else(|_| "3010".to_string())
            .parse()
            .expect("BACKEND_PORT must be a valid u16");
        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());
        let summary_dir = env::var("SUMMARY_DIR").unwrap_or_else(|_| "summaries".to_string());
        let chunk_max_words = env::var("CHUNK_MAX_WORDS")
            .unwrap_or_else(|_| "400".to_string())
            .parse()
            .expect("CHUNK_MAX_WORDS must be a positive integer");
        let summary_max_length = env::var("SUMMARY_MAX_LENGTH")
            .unwrap_or_else(|_| "150".to_string())
            .parse()
            .expect("SUMMARY_MAX_LENGTH must be a positive integer");
        let summary_min_length = env::var("SUMMARY_MIN_LENGTH")
            .unwrap_or_else(|_| "50".to_string())
            .parse()
            .expect("SUMMARY_MIN_LENGTH must be a positive integer");
        let ollama_url =
            env::var("OLLAMA_URL").unwrap_or_else(|_| "http://localhost:11434".to_string());
        let summary_model = env::var("SUMMARY_MODEL").unwrap_or_else(|_| "llama3.2".to_string());

        Self {
            host,
            port,
            upload_dir,
            summary_dir,
            chunk_max_words,
            summary_max_length,
            summary_min_length,
            ollama_url,
            summary_model,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn summarizer_config(&self) -> SummarizerConfig {
        SummarizerConfig {
            ollama_url: self.ollama_url.clone(),
            model: self.summary_model.clone(),
        }
    }

    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            max_words: self.chunk_max_words,
            summary_max_length: self.summary_max_length,
            summary_min_length: self.summary_min_length,
        }
    }
}
