//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and [`FixedSizeChunker`], which
//! splits text into overlapping fixed-size windows by character count.

use crate::error::{RagError, Result};

/// A window of source text produced by a [`Chunker`].
///
/// `start..end` is the byte range of the window in the source text. Windows
/// carry no id and no embedding; the pipeline attaches both later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextWindow {
    /// The window's text content.
    pub text: String,
    /// Byte offset of the window's start in the source text.
    pub start: usize,
    /// Byte offset one past the window's end in the source text.
    pub end: usize,
}

/// A strategy for splitting text into retrievable windows.
///
/// Implementations are pure functions of their input: no side effects, and
/// the same text always produces the same windows.
pub trait Chunker: Send + Sync {
    /// Split text into windows.
    ///
    /// Returns an empty `Vec` for empty input. Every character of the input
    /// appears in at least one window.
    fn chunk(&self, text: &str) -> Vec<TextWindow>;
}

/// Splits text into fixed-size windows by character count with configurable
/// overlap.
///
/// The cursor starts at character 0. Each step emits the window from the
/// cursor to `min(cursor + chunk_size, len)`; once a window reaches the end
/// of the text the chunker stops, otherwise the cursor advances by
/// `chunk_size - overlap`. Consecutive windows therefore share exactly
/// `overlap` characters of context, except near the final partial window.
///
/// Sizes are counted in `char`s, not bytes, so multibyte text never splits
/// inside a character. Reported spans are byte offsets on `char` boundaries.
///
/// # Example
///
/// ```rust,ignore
/// use ragkit::FixedSizeChunker;
///
/// let chunker = FixedSizeChunker::new(500, 50)?;
/// let windows = chunker.chunk(&document.text);
/// ```
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl FixedSizeChunker {
    /// Create a new `FixedSizeChunker`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] unless `chunk_size > chunk_overlap`;
    /// with any other parameters the window would never advance.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size <= chunk_overlap {
            return Err(RagError::ConfigError(format!(
                "chunk_overlap ({chunk_overlap}) must be less than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self { chunk_size, chunk_overlap })
    }
}

impl Chunker for FixedSizeChunker {
    fn chunk(&self, text: &str) -> Vec<TextWindow> {
        if text.is_empty() {
            return Vec::new();
        }

        // Byte offset of every char boundary, plus the end of the text, so
        // windows can be measured in chars and sliced in bytes.
        let boundaries: Vec<usize> =
            text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len())).collect();
        let char_len = boundaries.len() - 1;

        let mut windows = Vec::new();
        let mut cursor = 0;

        loop {
            let end = (cursor + self.chunk_size).min(char_len);
            let (lo, hi) = (boundaries[cursor], boundaries[end]);
            windows.push(TextWindow { text: text[lo..hi].to_string(), start: lo, end: hi });

            if end == char_len {
                break;
            }
            cursor += self.chunk_size - self.chunk_overlap;
        }

        windows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_no_windows() {
        let chunker = FixedSizeChunker::new(20, 5).unwrap();
        assert!(chunker.chunk("").is_empty());
    }

    #[test]
    fn rejects_overlap_not_smaller_than_size() {
        assert!(matches!(FixedSizeChunker::new(20, 20), Err(RagError::ConfigError(_))));
        assert!(matches!(FixedSizeChunker::new(10, 15), Err(RagError::ConfigError(_))));
        assert!(matches!(FixedSizeChunker::new(0, 0), Err(RagError::ConfigError(_))));
    }

    #[test]
    fn windows_respect_size_and_overlap() {
        let text = "1234567890".repeat(10); // 100 chars
        let chunker = FixedSizeChunker::new(20, 5).unwrap();
        let windows = chunker.chunk(&text);

        assert!(!windows.is_empty());
        assert!(windows.iter().all(|w| w.text.chars().count() <= 20));
        // Second window starts with the last 5 chars of the first.
        let tail: String = windows[0].text.chars().rev().take(5).collect::<Vec<_>>()
            .into_iter().rev().collect();
        assert!(windows[1].text.starts_with(&tail));
    }

    #[test]
    fn windows_cover_the_entire_text() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(7);
        let chunker = FixedSizeChunker::new(37, 9).unwrap();
        let windows = chunker.chunk(&text);

        assert_eq!(windows[0].start, 0);
        assert_eq!(windows.last().unwrap().end, text.len());
        for w in &windows {
            assert_eq!(&text[w.start..w.end], w.text);
        }
        // No gap between consecutive windows.
        for pair in windows.windows(2) {
            assert!(pair[1].start <= pair[0].end);
        }
    }

    #[test]
    fn zero_overlap_partitions_exactly() {
        let text = "abcdefghij";
        let chunker = FixedSizeChunker::new(4, 0).unwrap();
        let windows = chunker.chunk(text);
        let stitched: String = windows.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(stitched, text);
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[2].text, "ij");
    }

    #[test]
    fn text_shorter_than_window_is_a_single_chunk() {
        let chunker = FixedSizeChunker::new(500, 50).unwrap();
        let windows = chunker.chunk("short");
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].text, "short");
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let text = "é".repeat(9); // 9 chars, 18 bytes
        let chunker = FixedSizeChunker::new(5, 1).unwrap();
        let windows = chunker.chunk(&text);

        assert_eq!(windows[0].text.chars().count(), 5);
        assert_eq!(windows[0].end, 10); // 5 chars * 2 bytes
        assert_eq!(windows.last().unwrap().end, text.len());
        for w in &windows {
            assert_eq!(&text[w.start..w.end], w.text);
        }
    }
}
