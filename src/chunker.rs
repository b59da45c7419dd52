/// Splits text into sentence-aligned chunks bounded by a word budget, sized
/// for a summarization model with a limited input window.
///
/// Sentences are delimited by the literal `". "`. The splitter is naive and
/// does not special-case abbreviations or decimal points. A sentence whose
/// word count alone exceeds `max_words` becomes its own chunk; it is never
/// split mid-sentence and never dropped.
pub fn split_into_chunks(text: &str, max_words: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_words = 0;

    for sentence in text.split(". ") {
        let words = sentence.split_whitespace().count();
        if current_words + words <= max_words {
            current.push(sentence);
            current_words += words;
        } else {
            if !current.is_empty() {
                chunks.push(close_chunk(&current));
            }
            current = vec![sentence];
            current_words = words;
        }
    }

    if !current.is_empty() {
        chunks.push(close_chunk(&current));
    }

    chunks
}

// The last sentence of the input keeps its own terminator after the split,
// so only add one when the joined text does not already end with a period.
fn close_chunk(sentences: &[&str]) -> String {
    let joined = sentences.join(". ");
    if joined.ends_with('.') {
        joined
    } else {
        format!("{}.", joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(word: &str, count: usize) -> String {
        vec![word; count].join(" ")
    }

    #[test]
    fn short_text_fits_in_one_chunk() {
        let chunks = split_into_chunks("A. B. C.", 400);
        assert_eq!(chunks, vec!["A. B. C.".to_string()]);
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(split_into_chunks("", 400).is_empty());
        assert!(split_into_chunks("   \n  ", 400).is_empty());
    }

    #[test]
    fn two_large_sentences_get_their_own_chunks() {
        let text = format!("{}. {}.", sentence("alpha", 300), sentence("beta", 300));
        let chunks = split_into_chunks(&text, 400);
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].starts_with("alpha"));
        assert!(chunks[1].starts_with("beta"));
        for chunk in &chunks {
            assert!(chunk.split_whitespace().count() <= 400);
        }
    }

    #[test]
    fn oversized_sentence_is_kept_whole() {
        let text = sentence("word", 1000);
        let chunks = split_into_chunks(&text, 400);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].split_whitespace().count(), 1000);
    }

    #[test]
    fn oversized_sentence_mid_document_does_not_leak_an_empty_chunk() {
        let text = format!("{}. {}. tail", sentence("big", 500), sentence("big", 500));
        let chunks = split_into_chunks(&text, 400);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c != "."));
    }

    #[test]
    fn chunks_respect_word_budget() {
        let text = (0..10)
            .map(|_| sentence("w", 5))
            .collect::<Vec<_>>()
            .join(". ");
        let chunks = split_into_chunks(&text, 12);
        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(
                chunk.split_whitespace().count() <= 12,
                "chunk over budget: {chunk:?}"
            );
        }
    }

    #[test]
    fn every_sentence_appears_exactly_once_in_order() {
        let text = "one two. three four. five six";
        let chunks = split_into_chunks(text, 3);
        let recovered: Vec<String> = chunks
            .iter()
            .flat_map(|c| c.trim_end_matches('.').split(". "))
            .map(|s| s.to_string())
            .collect();
        assert_eq!(recovered, vec!["one two", "three four", "five six"]);
    }

    #[test]
    fn splitting_is_deterministic() {
        let text = format!(
            "{}. {}. {}",
            sentence("a", 7),
            sentence("b", 9),
            sentence("c", 4)
        );
        assert_eq!(split_into_chunks(&text, 10), split_into_chunks(&text, 10));
    }

    #[test]
    fn trailing_text_without_delimiter_is_preserved() {
        let chunks = split_into_chunks("first part. trailing words", 400);
        assert_eq!(chunks, vec!["first part. trailing words.".to_string()]);
    }
}
