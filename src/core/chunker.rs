//! Token-window text chunking.
//!
//! Splits a document body into overlapping windows of
//! whitespace-delimited tokens. Windows are bounded by a maximum
//! token count and consecutive windows share a fixed number of
//! tokens, so no sentence straddling a boundary is lost to
//! retrieval. A "token" here is a whitespace-delimited substring,
//! not a model tokenizer token.
//!
//! # Example
//!
//! ```
//! use embedpack::core::chunker::Chunker;
//!
//! let chunker = Chunker::new(800, 80).unwrap();
//! let chunks = chunker.chunk_text("some document body", "docs/intro.md");
//! assert_eq!(chunks.len(), 1);
//! ```

use crate::core::error::{IngestError, Result};
use crate::core::types::Chunk;

/// Split text into whitespace-delimited tokens.
///
/// Splits on any run of whitespace and discards empty tokens.
/// Pure and total; identical input always yields the same
/// sequence.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Overlapping token-window chunker.
#[derive(Debug, Clone)]
pub struct Chunker {
    /// Maximum number of tokens per chunk
    max_tokens: usize,

    /// Number of tokens shared between consecutive chunks
    overlap_tokens: usize,
}

impl Chunker {
    /// Create a new chunker with the given window configuration.
    ///
    /// Fails with [`IngestError::InvalidChunkConfig`] when
    /// `max_tokens` is zero or `overlap_tokens >= max_tokens`.
    /// Both would stall the cursor, so they are rejected here
    /// rather than guarded in the loop.
    pub fn new(max_tokens: usize, overlap_tokens: usize) -> Result<Self> {
        if max_tokens == 0 {
            return Err(IngestError::InvalidChunkConfig(
                "max_tokens must be non-zero".to_string(),
            ));
        }
        if overlap_tokens >= max_tokens {
            return Err(IngestError::InvalidChunkConfig(format!(
                "overlap_tokens ({overlap_tokens}) must be less than max_tokens ({max_tokens})"
            )));
        }

        Ok(Self {
            max_tokens,
            overlap_tokens,
        })
    }

    /// Get the maximum tokens per chunk.
    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Get the overlap in tokens.
    pub fn overlap_tokens(&self) -> usize {
        self.overlap_tokens
    }

    /// Chunk a document body into overlapping token windows.
    ///
    /// Tokenizes the input, then walks a cursor over the token
    /// sequence: each chunk covers `[start, min(start + max, total))`,
    /// and the next chunk begins `overlap_tokens` before the end of
    /// the previous one. The final chunk may be shorter than the
    /// maximum. Chunk text is the window's tokens rejoined by
    /// single spaces, so original whitespace runs are not
    /// preserved.
    ///
    /// An empty or whitespace-only body yields no chunks.
    pub fn chunk_text(&self, text: &str, file: &str) -> Vec<Chunk> {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut start = 0;

        while start < tokens.len() {
            let end = (start + self.max_tokens).min(tokens.len());
            let window = &tokens[start..end];

            chunks.push(Chunk {
                text: window.join(" "),
                file: file.to_string(),
                chunk_index: chunks.len(),
                token_count: window.len(),
            });

            if end == tokens.len() {
                break;
            }

            // overlap < max_tokens is enforced at construction,
            // so the cursor always advances
            start = end - self.overlap_tokens;
        }

        chunks
    }
}
