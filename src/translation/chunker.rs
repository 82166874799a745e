/*!
 * Splitting extracted document text into provider-sized segments.
 *
 * Two size policies exist:
 * - `ChunkUnit::Characters` cuts the raw text into fixed windows of Unicode
 *   scalar values. Nothing is trimmed, so joining the segments gives back the
 *   input exactly.
 * - `ChunkUnit::Words` tokenizes on whitespace and regroups the tokens with single
 *   spaces. Line and paragraph breaks inside the text are not kept.
 */

use serde::{Deserialize, Serialize};

use crate::errors::TranslationError;

/// Unit in which a segment limit is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkUnit {
    /// Unicode scalar values
    Characters,
    /// Whitespace-separated tokens
    Words,
}

impl std::fmt::Display for ChunkUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Characters => write!(f, "characters"),
            Self::Words => write!(f, "words"),
        }
    }
}

/// Size policy for one provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPolicy {
    /// Maximum segment size, in `unit`
    pub limit: usize,
    /// How `limit` is measured
    pub unit: ChunkUnit,
}

impl ChunkPolicy {
    /// Create a policy, rejecting a zero limit
    pub fn new(limit: usize, unit: ChunkUnit) -> Result<Self, TranslationError> {
        if limit == 0 {
            return Err(TranslationError::InvalidChunkLimit);
        }
        Ok(Self { limit, unit })
    }

    /// Split text under this policy
    pub fn split(&self, text: &str) -> Vec<Segment> {
        split(text, self.limit, self.unit)
    }
}

/// A contiguous slice of the document text, sent as one translation unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// 0-based position in the ordered sequence
    pub index: usize,
    /// Segment text
    pub content: String,
    /// Size measured in the policy's unit
    pub size: usize,
}

/// Split text into ordered segments of at most `limit` units each
///
/// Empty (or, under the word policy, whitespace-only) text yields no segments.
/// A `limit` of zero is treated as one so the split always terminates; callers
/// should build a `ChunkPolicy` to have it rejected instead.
pub fn split(text: &str, limit: usize, unit: ChunkUnit) -> Vec<Segment> {
    let limit = limit.max(1);
    match unit {
        ChunkUnit::Characters => split_by_characters(text, limit),
        ChunkUnit::Words => split_by_words(text, limit),
    }
}

fn split_by_characters(text: &str, limit: usize) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (byte_pos, _) in text.char_indices() {
        if count == limit {
            segments.push(Segment {
                index: segments.len(),
                content: text[start..byte_pos].to_string(),
                size: count,
            });
            start = byte_pos;
            count = 0;
        }
        count += 1;
    }

    if count > 0 {
        segments.push(Segment {
            index: segments.len(),
            content: text[start..].to_string(),
            size: count,
        });
    }

    segments
}

fn split_by_words(text: &str, limit: usize) -> Vec<Segment> {
    let words: Vec<&str> = text.split_whitespace().collect();

    words.chunks(limit)
        .enumerate()
        .map(|(index, group)| Segment {
            index,
            content: group.join(" "),
            size: group.len(),
        })
        .collect()
}
