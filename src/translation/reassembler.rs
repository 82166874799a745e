/*!
 * Joining translated segments back into one text, and cutting that text into
 * paragraphs for the document writer.
 */

use super::core::SegmentResult;

/// Separator placed between consecutive translated segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinPolicy {
    /// Single line break (web translator output mirrors the input lines)
    Newline,
    /// Blank line (language models answer in paragraphs)
    BlankLine,
}

impl JoinPolicy {
    /// The literal separator
    pub fn separator(&self) -> &'static str {
        match self {
            Self::Newline => "\n",
            Self::BlankLine => "\n\n",
        }
    }
}

/// Joins ordered translation results
#[derive(Debug, Clone, Copy)]
pub struct Reassembler {
    join: JoinPolicy,
}

impl Reassembler {
    pub fn new(join: JoinPolicy) -> Self {
        Self { join }
    }

    /// Consume the accumulated results and produce the translated text
    ///
    /// Failed segments contribute their `[Error: ...]` marker in place.
    pub fn join(&self, mut results: Vec<SegmentResult>) -> String {
        results.sort_by_key(|r| r.index);

        let mut text = String::new();
        for (position, result) in results.iter().enumerate() {
            if position > 0 {
                text.push_str(self.join.separator());
            }
            text.push_str(&result.outcome.text());
        }
        text
    }
}

/// Non-blank lines of the translated text, one per output paragraph
pub fn paragraphs(text: &str) -> Vec<&str> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .collect()
}
