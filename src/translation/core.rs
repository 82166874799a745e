/*!
 * Core translation service implementation.
 *
 * This module contains the TranslationService, which owns the configured
 * provider and turns every backend call into a `SegmentOutcome`. Provider
 * failures stop here: callers always get either a translation or an inline
 * error marker, never an `Err`.
 */

use std::borrow::Cow;
use log::{debug, warn};

use crate::app_config::{Config, TranslationConfig, TranslationProvider};
use crate::errors::{ProviderError, TranslationError};
use crate::language_utils;
use crate::providers::Provider;
use crate::providers::anthropic::Anthropic;
use crate::providers::gemini::Gemini;
use crate::providers::google::GoogleTranslate;
use crate::providers::huggingface::HuggingFace;
use crate::providers::openai::OpenAI;
use super::profile::ProviderProfile;

/// Log entry captured during a job
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
}

/// What one backend call produced for a segment
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentOutcome {
    /// The provider answered
    Translated(String),
    /// The provider failed; holds the error description
    Failed(String),
}

impl SegmentOutcome {
    /// Text contributed to the reassembled output
    ///
    /// Failures render as `[Error: <description>]` so they stay visible inline.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Translated(text) => Cow::Borrowed(text.as_str()),
            Self::Failed(description) => Cow::Owned(format!("[Error: {}]", description)),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Error description, when the segment failed
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(description) => Some(description.as_str()),
            Self::Translated(_) => None,
        }
    }
}

impl From<Result<String, ProviderError>> for SegmentOutcome {
    fn from(result: Result<String, ProviderError>) -> Self {
        match result {
            Ok(text) => Self::Translated(text),
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

/// Outcome of one segment, tagged with its position
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentResult {
    /// Index of the source segment
    pub index: usize,
    /// Translation or failure
    pub outcome: SegmentOutcome,
}

/// Main translation service
///
/// Holds one provider and its dispatch profile for the lifetime of a job.
#[derive(Debug)]
pub struct TranslationService {
    /// Provider implementation
    provider: Box<dyn Provider>,
    /// Chunking, throttling and joining parameters
    profile: ProviderProfile,
}

impl TranslationService {
    /// Create a translation service for the active provider of `config`
    ///
    /// Fails before anything is sent when an LLM provider has no credential.
    pub fn new(config: &TranslationConfig, source_language: &str) -> Result<Self, TranslationError> {
        let provider = Self::create_provider(config, source_language)?;
        let profile = ProviderProfile::from_config(config);
        // A zero limit is rejected here rather than at the first split
        profile.chunk_policy()?;

        debug!(
            "Translation service ready: {} ({} {} per segment, {:?} between calls)",
            provider.name(), profile.chunk_limit, profile.chunk_unit, profile.delay
        );

        Ok(Self { provider, profile })
    }

    /// Create a translation service from the full application config
    pub fn from_config(config: &Config) -> Result<Self, TranslationError> {
        if !language_utils::is_auto(&config.source_language) {
            language_utils::validate_language_code(&config.source_language)
                .map_err(|_| TranslationError::InvalidLanguage(config.source_language.clone()))?;
        }
        Self::new(&config.translation, &config.source_language)
    }

    /// Wrap an already built provider
    pub fn with_provider(provider: Box<dyn Provider>, profile: ProviderProfile) -> Self {
        Self { provider, profile }
    }

    /// Build the provider client selected by `config.provider`
    pub fn create_provider(config: &TranslationConfig, source_language: &str) -> Result<Box<dyn Provider>, TranslationError> {
        let provider_type = config.provider;
        let api_key = config.get_api_key();
        if provider_type.requires_api_key() && api_key.is_empty() {
            return Err(TranslationError::MissingCredential {
                provider: provider_type.display_name().to_string(),
            });
        }

        let endpoint = config.get_endpoint();
        let timeout_secs = config.get_timeout_secs();

        let provider: Box<dyn Provider> = match provider_type {
            TranslationProvider::Google => Box::new(
                GoogleTranslate::new(endpoint)
                    .with_timeout(timeout_secs)
                    .with_source_language(source_language)
            ),
            TranslationProvider::OpenAI => Box::new(
                OpenAI::new(api_key, endpoint, config.get_model())
                    .with_sampling(config.get_temperature(), config.get_max_tokens())
                    .with_timeout(timeout_secs)
                    .with_source_language(source_language)
            ),
            TranslationProvider::Anthropic => Box::new(
                Anthropic::new(api_key, endpoint, config.get_model())
                    .with_max_tokens(config.get_max_tokens())
                    .with_timeout(timeout_secs)
                    .with_source_language(source_language)
            ),
            TranslationProvider::Gemini => Box::new(
                Gemini::new(api_key, endpoint, config.get_model_candidates())
                    .with_sampling(config.get_temperature(), config.get_max_tokens())
                    .with_timeout(timeout_secs)
                    .with_source_language(source_language)
            ),
            TranslationProvider::HuggingFace => Box::new(
                HuggingFace::new(api_key, endpoint, config.get_model())
                    .with_max_tokens(config.get_max_tokens())
                    .with_timeout(timeout_secs)
                    .with_source_language(source_language)
            ),
        };

        Ok(provider)
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// The dispatch profile in use
    pub fn profile(&self) -> &ProviderProfile {
        &self.profile
    }

    /// Translate one segment; provider errors become `SegmentOutcome::Failed`
    pub async fn translate_segment(&self, text: &str, target_language: &str) -> SegmentOutcome {
        let outcome = SegmentOutcome::from(self.provider.translate(text, target_language).await);
        if let Some(e) = outcome.error() {
            warn!("{} failed to translate segment: {}", self.provider.name(), e);
        }
        outcome
    }

    /// Test the connection to the translation provider
    pub async fn test_connection(&self, target_language: &str) -> Result<(), ProviderError> {
        self.provider.test_connection(target_language).await
    }
}
