/*!
 * Tests for segment splitting
 */

use pdftwai::translation::chunker::{split, ChunkPolicy, ChunkUnit};
use pdftwai::errors::TranslationError;
use crate::common;

/// Character segments joined back together give the original text for any limit
#[test]
fn test_split_characters_withVariousLimits_shouldReconstructText() {
    let text = "Première ligne.\n\n  Zweite Zeile — mit Ümlauten.\r\n第三行 🚀 fin\t";

    for limit in [1, 2, 3, 7, 16, 64, 1000] {
        let segments = split(text, limit, ChunkUnit::Characters);
        let joined: String = segments.iter().map(|s| s.content.as_str()).collect();

        assert_eq!(joined, text, "limit {}", limit);
        assert!(segments.iter().all(|s| s.size <= limit && s.size == s.content.chars().count()));
    }
}

/// Word segment count is ceil(words / limit) and the last one holds the remainder
#[test]
fn test_split_words_withVariousCounts_shouldMatchCeilingFormula() {
    for word_count in [1usize, 5, 10, 11, 99, 100, 101] {
        let text = common::numbered_words(word_count);
        for limit in [1usize, 3, 10, 100] {
            let segments = split(&text, limit, ChunkUnit::Words);
            let expected_segments = word_count.div_ceil(limit);
            let expected_last = if word_count % limit == 0 { limit } else { word_count % limit };

            assert_eq!(segments.len(), expected_segments, "{} words, limit {}", word_count, limit);
            let last = segments.last().unwrap();
            assert_eq!(last.size, expected_last);
            assert_eq!(last.content.split_whitespace().count(), expected_last);
        }
    }
}

/// Indices are 0-based and contiguous
#[test]
fn test_split_words_shouldNumberSegmentsInOrder() {
    let segments = split(&common::numbered_words(25), 10, ChunkUnit::Words);
    let indices: Vec<usize> = segments.iter().map(|s| s.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert!(segments[0].content.starts_with("w0 w1"));
    assert!(segments[2].content.ends_with("w24"));
}

/// Word mode joins tokens with single spaces, dropping line breaks
#[test]
fn test_split_words_withParagraphs_shouldCollapseWhitespace() {
    let segments = split("Title\n\nFirst   paragraph.\n\tSecond.", 100, ChunkUnit::Words);
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].content, "Title First paragraph. Second.");
}

/// Empty or whitespace-only input produces no segments
#[test]
fn test_split_withEmptyInput_shouldYieldNothing() {
    assert!(split("", 10, ChunkUnit::Characters).is_empty());
    assert!(split("", 10, ChunkUnit::Words).is_empty());
    assert!(split(" \n\t ", 10, ChunkUnit::Words).is_empty());
}

/// A zero limit cannot be turned into a policy
#[test]
fn test_chunkPolicy_withZeroLimit_shouldBeRejected() {
    assert!(matches!(ChunkPolicy::new(0, ChunkUnit::Words), Err(TranslationError::InvalidChunkLimit)));

    let policy = ChunkPolicy::new(4500, ChunkUnit::Characters).unwrap();
    let sizes: Vec<usize> = policy.split(&"x".repeat(10_000)).iter().map(|s| s.size).collect();
    assert_eq!(sizes, vec![4500, 4500, 1000]);
}
