//! Reveal chunk splitting.
//!
//! Walks grapheme clusters and cuts after a whitespace or punctuation
//! cluster once the accumulated chunk is long enough. Cutting only ever
//! happens after a full cluster, so emoji and combining sequences never
//! split, and concatenating the chunks reproduces the input exactly.

use crate::core::config::DEFAULT_MIN_CHUNK_LEN;
use crate::core::{Chunk, PipelineConfig};
use unicode_segmentation::UnicodeSegmentation;

/// Splits clean text into reveal chunks.
///
/// # Examples
///
/// ```
/// use textmend::reveal::RevealSplitter;
///
/// let splitter = RevealSplitter::new();
/// let chunks = splitter.split("Hi, there!");
/// let joined: String = chunks.iter().map(|c| c.content.as_str()).collect();
/// assert_eq!(joined, "Hi, there!");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RevealSplitter {
    /// Minimum chunk length in grapheme clusters before a cut is allowed.
    min_len: usize,
}

impl Default for RevealSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl RevealSplitter {
    /// Creates a splitter with the default minimum chunk length.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_len: DEFAULT_MIN_CHUNK_LEN,
        }
    }

    /// Creates a splitter with a custom minimum chunk length.
    #[must_use]
    pub const fn with_min_len(min_len: usize) -> Self {
        Self { min_len }
    }

    /// Creates a splitter from a pipeline configuration.
    #[must_use]
    pub const fn from_config(config: &PipelineConfig) -> Self {
        Self {
            min_len: config.min_chunk_len,
        }
    }

    /// Returns the minimum chunk length in grapheme clusters.
    #[must_use]
    pub const fn min_len(&self) -> usize {
        self.min_len
    }

    /// Splits `text` into non-empty chunks that tile it exactly.
    ///
    /// A cut happens after a whitespace or ASCII-punctuation cluster once
    /// the accumulated chunk holds at least `min_len` clusters. The final
    /// partial chunk is always emitted; empty input yields no chunks.
    #[must_use]
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut start = 0;
        let mut len = 0;
        let mut index = 0;

        for (offset, grapheme) in text.grapheme_indices(true) {
            len += 1;
            if len >= self.min_len && is_break_cluster(grapheme) {
                let end = offset + grapheme.len();
                chunks.push(Chunk::new(text[start..end].to_string(), start..end, index));
                index += 1;
                start = end;
                len = 0;
            }
        }

        if start < text.len() {
            chunks.push(Chunk::new(
                text[start..].to_string(),
                start..text.len(),
                index,
            ));
        }
        chunks
    }
}

/// Returns whether a cut is allowed after this cluster.
fn is_break_cluster(grapheme: &str) -> bool {
    grapheme
        .chars()
        .all(|c| c.is_whitespace() || c.is_ascii_punctuation())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn join(chunks: &[Chunk]) -> String {
        chunks.iter().map(|c| c.content.as_str()).collect()
    }

    #[test]
    fn test_split_empty() {
        let splitter = RevealSplitter::new();
        assert!(splitter.split("").is_empty());
    }

    #[test]
    fn test_split_reconstructs_input() {
        let splitter = RevealSplitter::new();
        let inputs = [
            "Hello, world!",
            "no-breaks-here",
            "a b c d e f",
            "Ends mid",
            "multi\nline\ntext with words",
            "emoji 🎉 and accents é here",
        ];
        for input in inputs {
            assert_eq!(join(&splitter.split(input)), input, "lost bytes on {input:?}");
        }
    }

    #[test]
    fn test_split_chunks_non_empty() {
        let splitter = RevealSplitter::new();
        for chunk in splitter.split("Some sample text, with punctuation. And more!") {
            assert!(!chunk.is_empty());
        }
    }

    #[test]
    fn test_split_breaks_after_boundary() {
        let splitter = RevealSplitter::with_min_len(3);
        let chunks = splitter.split("Hello, world!");
        let contents: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["Hello,", " world!"]);
    }

    #[test]
    fn test_split_respects_min_len() {
        let splitter = RevealSplitter::with_min_len(10);
        let chunks = splitter.split("a b c d e f g h");
        for chunk in &chunks {
            // Every chunk except the final partial one reaches the minimum
            if chunk.index + 1 < chunks.len() {
                assert!(chunk.grapheme_len() >= 10);
            }
        }
        assert_eq!(join(&chunks), "a b c d e f g h");
    }

    #[test]
    fn test_split_final_partial_emitted() {
        let splitter = RevealSplitter::with_min_len(3);
        let chunks = splitter.split("ab. cd");
        let contents: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        // "cd" never reaches a boundary but is still emitted
        assert_eq!(contents, vec!["ab.", " cd"]);
    }

    #[test]
    fn test_split_no_boundary_single_chunk() {
        let splitter = RevealSplitter::new();
        let chunks = splitter.split("unbreakable");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "unbreakable");
    }

    #[test]
    fn test_split_byte_ranges_tile() {
        let splitter = RevealSplitter::new();
        let text = "One two three, four! Five six.";
        let chunks = splitter.split(text);
        let mut pos = 0;
        for chunk in &chunks {
            assert_eq!(chunk.start(), pos);
            assert_eq!(&text[chunk.byte_range.clone()], chunk.content);
            pos = chunk.end();
        }
        assert_eq!(pos, text.len());
    }

    #[test]
    fn test_split_indices_sequential() {
        let splitter = RevealSplitter::new();
        let chunks = splitter.split("a? b? c? d?");
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
        }
    }

    #[test]
    fn test_split_never_cuts_grapheme() {
        let splitter = RevealSplitter::with_min_len(1);
        let text = "ok 👨\u{200D}👩\u{200D}👧 done";
        let chunks = splitter.split(text);
        assert_eq!(join(&chunks), text);
        for chunk in &chunks {
            assert!(text.is_char_boundary(chunk.start()));
            assert!(text.is_char_boundary(chunk.end()));
        }
    }

    #[test]
    fn test_split_min_len_one_cuts_at_every_boundary() {
        let splitter = RevealSplitter::with_min_len(1);
        let chunks = splitter.split("a b");
        let contents: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["a ", "b"]);
    }

    #[test]
    fn test_splitter_from_config() {
        let config = PipelineConfig::new().with_min_chunk_len(7);
        let splitter = RevealSplitter::from_config(&config);
        assert_eq!(splitter.min_len(), 7);
    }
}
