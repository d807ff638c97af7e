//! Reveal chunk representation.
//!
//! Chunks are segments of clean text produced by the reveal splitter.
//! Each chunk keeps its byte position within the clean text so the
//! renderer can reconstruct or re-slice the original string exactly.

use serde::{Deserialize, Serialize};
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// A segment of clean text to reveal as one unit.
///
/// Concatenating chunk contents in index order reproduces the clean text
/// byte for byte.
///
/// # Examples
///
/// ```
/// use textmend::core::Chunk;
///
/// let chunk = Chunk::new("Hello, ".to_string(), 0..7, 0);
/// assert_eq!(chunk.size(), 7);
/// assert_eq!(chunk.start(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk content.
    pub content: String,

    /// Byte range in the clean text.
    pub byte_range: Range<usize>,

    /// Sequential index within the clean text (0-based).
    pub index: usize,
}

impl Chunk {
    /// Creates a new chunk.
    ///
    /// # Arguments
    ///
    /// * `content` - Chunk content.
    /// * `byte_range` - Byte range in the clean text.
    /// * `index` - Sequential index within the clean text.
    #[must_use]
    pub const fn new(content: String, byte_range: Range<usize>, index: usize) -> Self {
        Self {
            content,
            byte_range,
            index,
        }
    }

    /// Returns the size of the chunk in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Returns the byte range size.
    #[must_use]
    pub const fn range_size(&self) -> usize {
        self.byte_range.end - self.byte_range.start
    }

    /// Returns the chunk length in grapheme clusters.
    #[must_use]
    pub fn grapheme_len(&self) -> usize {
        self.content.graphemes(true).count()
    }

    /// Checks if the chunk is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the start byte offset in the clean text.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.byte_range.start
    }

    /// Returns the end byte offset in the clean text.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.byte_range.end
    }

    /// Returns a preview of the chunk content (first `max_len` bytes,
    /// clipped to a character boundary).
    #[must_use]
    pub fn preview(&self, max_len: usize) -> &str {
        if self.content.len() <= max_len {
            &self.content
        } else {
            let end = find_char_boundary(&self.content, max_len);
            &self.content[..end]
        }
    }
}

/// Finds a valid UTF-8 character boundary at or before the given position.
pub(crate) fn find_char_boundary(s: &str, pos: usize) -> usize {
    if pos >= s.len() {
        return s.len();
    }
    let mut boundary = pos;
    while !s.is_char_boundary(boundary) && boundary > 0 {
        boundary -= 1;
    }
    boundary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_new() {
        let chunk = Chunk::new("Hello".to_string(), 0..5, 0);
        assert_eq!(chunk.content, "Hello");
        assert_eq!(chunk.byte_range, 0..5);
        assert_eq!(chunk.index, 0);
    }

    #[test]
    fn test_chunk_size() {
        let chunk = Chunk::new("Hello, world!".to_string(), 0..13, 0);
        assert_eq!(chunk.size(), 13);
        assert_eq!(chunk.range_size(), 13);
    }

    #[test]
    fn test_chunk_offsets() {
        let chunk = Chunk::new("world".to_string(), 7..12, 1);
        assert_eq!(chunk.start(), 7);
        assert_eq!(chunk.end(), 12);
    }

    #[test]
    fn test_chunk_grapheme_len() {
        let chunk = Chunk::new("héllo".to_string(), 0..6, 0);
        assert_eq!(chunk.grapheme_len(), 5);

        let emoji = Chunk::new("👍🏽".to_string(), 0..8, 0);
        assert_eq!(emoji.grapheme_len(), 1);
    }

    #[test]
    fn test_chunk_preview() {
        let chunk = Chunk::new("Hello, world!".to_string(), 0..13, 0);
        assert_eq!(chunk.preview(5), "Hello");
        assert_eq!(chunk.preview(100), "Hello, world!");
    }

    #[test]
    fn test_chunk_preview_char_boundary() {
        let chunk = Chunk::new("héllo".to_string(), 0..6, 0);
        // Byte 2 falls inside the two-byte é; preview clips back to byte 1
        assert_eq!(chunk.preview(2), "h");
    }

    #[test]
    fn test_chunk_serialization() {
        let chunk = Chunk::new("test".to_string(), 0..4, 0);
        let json = serde_json::to_string(&chunk);
        assert!(json.is_ok());

        let deserialized: Result<Chunk, _> = serde_json::from_str(&json.unwrap());
        assert!(deserialized.is_ok());
        assert_eq!(deserialized.unwrap().content, "test");
    }

    #[test]
    fn test_chunk_empty() {
        let chunk = Chunk::new(String::new(), 0..0, 0);
        assert!(chunk.is_empty());
        assert_eq!(chunk.size(), 0);
    }
}
