// Integration tests for token-window chunking arithmetic

use embedpack::core::chunker::{tokenize, Chunker};

use crate::common::numbered_tokens;

/// Expected chunk count for a document of `total` tokens.
///
/// One full window per `max - overlap` step, plus the initial
/// window; documents at or under the window size fit in one
/// chunk.
fn expected_chunks(total: usize, max: usize, overlap: usize) -> usize {
    if total == 0 {
        0
    } else if total <= max {
        1
    } else {
        1 + (total - max).div_ceil(max - overlap)
    }
}

#[test]
fn test_chunk_count_matches_window_arithmetic() {
    let cases = [
        // (total, max, overlap)
        (0, 10, 3),
        (1, 10, 3),
        (9, 10, 3),
        (10, 10, 3),
        (11, 10, 3),
        (25, 10, 3),
        (100, 10, 0),
        (100, 10, 9),
        (1000, 800, 80),
        (801, 800, 80),
        (800, 800, 80),
    ];

    for (total, max, overlap) in cases {
        let chunker = Chunker::new(max, overlap).unwrap();
        let chunks = chunker.chunk_text(&numbered_tokens(total), "doc.md");

        assert_eq!(
            chunks.len(),
            expected_chunks(total, max, overlap),
            "chunk count mismatch for total={total} max={max} overlap={overlap}"
        );
    }
}

#[test]
fn test_unique_spans_reconstruct_document() {
    // Dropping each chunk's leading overlap and concatenating
    // must reproduce every token exactly once, in order.
    for (total, max, overlap) in [(37, 7, 2), (64, 8, 3), (200, 25, 10)] {
        let body = numbered_tokens(total);
        let chunker = Chunker::new(max, overlap).unwrap();
        let chunks = chunker.chunk_text(&body, "doc.md");

        let mut rebuilt: Vec<&str> = Vec::new();
        for (i, chunk) in chunks.iter().enumerate() {
            let skip = if i == 0 { 0 } else { overlap };
            rebuilt.extend(chunk.text.split(' ').skip(skip));
        }

        assert_eq!(
            rebuilt.join(" "),
            body,
            "coverage mismatch for total={total} max={max} overlap={overlap}"
        );
    }
}

#[test]
fn test_no_chunk_exceeds_max_tokens() {
    let chunker = Chunker::new(13, 4).unwrap();
    let chunks = chunker.chunk_text(&numbered_tokens(150), "doc.md");

    for chunk in &chunks {
        assert!(chunk.token_count <= 13);
        assert_eq!(tokenize(&chunk.text).len(), chunk.token_count);
    }
}

#[test]
fn test_rechunking_is_idempotent() {
    let body = numbered_tokens(513);
    let chunker = Chunker::new(64, 16).unwrap();

    let first = chunker.chunk_text(&body, "doc.md");
    let second = chunker.chunk_text(&body, "doc.md");

    let a: Vec<_> = first.iter().map(|c| (&c.text, c.chunk_index)).collect();
    let b: Vec<_> = second.iter().map(|c| (&c.text, c.chunk_index)).collect();
    assert_eq!(a, b);
}

#[test]
fn test_boundary_zero_exact_and_one_past() {
    let chunker = Chunker::new(10, 3).unwrap();

    assert!(chunker.chunk_text("", "doc.md").is_empty());
    assert_eq!(chunker.chunk_text(&numbered_tokens(10), "doc.md").len(), 1);

    let two = chunker.chunk_text(&numbered_tokens(11), "doc.md");
    assert_eq!(two.len(), 2);
    // Second chunk begins at token index max - overlap = 7
    assert!(two[1].text.starts_with("t7 "));
}

#[test]
fn test_misconfigured_windows_rejected() {
    assert!(Chunker::new(0, 0).is_err());
    assert!(Chunker::new(8, 8).is_err());
    assert!(Chunker::new(8, 12).is_err());
}
