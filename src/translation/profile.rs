/*!
 * Provider-specific dispatch tuning.
 *
 * Each provider gets a default segment size, the unit it is measured in, the
 * delay the rate governor waits between calls, and the separator used when the
 * translated segments are joined back together.
 */

use std::time::Duration;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::TranslationError;

use super::chunker::{ChunkPolicy, ChunkUnit};
use super::reassembler::JoinPolicy;

/// Provider-specific profile with tuned defaults
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderProfile {
    /// Maximum segment size, in `chunk_unit`
    pub chunk_limit: usize,
    /// Unit the limit is measured in
    pub chunk_unit: ChunkUnit,
    /// Pause between the end of one call and the start of the next
    pub delay: Duration,
    /// How translated segments are joined
    pub join: JoinPolicy,
}

impl ProviderProfile {
    /// Get the default profile for a given provider
    pub fn for_provider(provider: TranslationProvider) -> Self {
        match provider {
            TranslationProvider::Google => Self {
                // The web endpoint rejects payloads above ~5000 characters
                chunk_limit: 4500,
                chunk_unit: ChunkUnit::Characters,
                delay: Duration::ZERO,
                join: JoinPolicy::Newline,
            },
            TranslationProvider::OpenAI => Self {
                chunk_limit: 1500,
                chunk_unit: ChunkUnit::Words,
                delay: Duration::from_secs(1),
                join: JoinPolicy::BlankLine,
            },
            TranslationProvider::Anthropic => Self {
                chunk_limit: 800,
                chunk_unit: ChunkUnit::Words,
                delay: Duration::from_secs(1),
                join: JoinPolicy::BlankLine,
            },
            TranslationProvider::Gemini => Self {
                chunk_limit: 1000,
                chunk_unit: ChunkUnit::Words,
                // Free tier allows roughly 15 requests per minute
                delay: Duration::from_secs(4),
                join: JoinPolicy::BlankLine,
            },
            TranslationProvider::HuggingFace => Self {
                // Output is capped by max_new_tokens, keep inputs short
                chunk_limit: 300,
                chunk_unit: ChunkUnit::Words,
                delay: Duration::from_millis(500),
                join: JoinPolicy::BlankLine,
            },
        }
    }

    /// Profile for the active provider with any configured overrides applied
    pub fn from_config(config: &TranslationConfig) -> Self {
        let mut profile = Self::for_provider(config.provider);
        if let Some(limit) = config.get_chunk_limit() {
            profile.chunk_limit = limit;
        }
        if let Some(delay_ms) = config.get_delay_ms() {
            profile.delay = Duration::from_millis(delay_ms);
        }
        profile
    }

    /// The chunk policy described by this profile
    pub fn chunk_policy(&self) -> Result<ChunkPolicy, TranslationError> {
        ChunkPolicy::new(self.chunk_limit, self.chunk_unit)
    }
}
