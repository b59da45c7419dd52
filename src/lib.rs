pub mod config;
pub mod chunker;
pub mod extractor;
pub mod summarizer;
pub mod pipeline;
pub mod api;
pub use pipeline::summarize_document;
pub use summarizer::SummaryProvider;
