// src/extractor.rs

use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read PDF: {0}")]
    Unreadable(String),
    #[error("PDF contained no extractable text")]
    Empty,
}

/// Extract the text content of every page of a PDF, concatenated in page
/// order. Scanned or image-only PDFs parse fine but yield no text; that case
/// is reported as [`ExtractError::Empty`] so it never reaches the summarizer
/// as a silently empty document.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let text = pdf_extract::extract_text(path)
        .map_err(|e| ExtractError::Unreadable(e.to_string()))?;
    debug!(path = %path.display(), text_len = text.len(), "Extracted PDF text");
    reject_blank(text)
}

fn reject_blank(text: String) -> Result<String, ExtractError> {
    if text.trim().is_empty() {
        Err(ExtractError::Empty)
    } else {
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_extraction_is_an_error() {
        assert!(matches!(reject_blank(String::new()), Err(ExtractError::Empty)));
        assert!(matches!(
            reject_blank("  \n\t ".to_string()),
            Err(ExtractError::Empty)
        ));
    }

    #[test]
    fn non_blank_extraction_passes_through() {
        let text = reject_blank("page one text".to_string()).unwrap();
        assert_eq!(text, "page one text");
    }
}
