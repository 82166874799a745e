/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the supported backends:
 * - Google: free web translation endpoint, no credential
 * - OpenAI: chat completions API
 * - Anthropic: messages API
 * - Gemini: generative language API, with a model-name fallback chain
 * - Hugging Face: hosted inference endpoint
 * - Mock: scripted provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;
use crate::language_utils;

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the translation service.
/// Implementations report failures as `ProviderError`; turning them into inline
/// markers is the translation service's job.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Human-readable provider name
    fn name(&self) -> &str;

    /// Translate one segment of text
    ///
    /// # Arguments
    /// * `text` - The segment to translate
    /// * `target_language` - ISO code of the language to translate into
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if a short probe translation succeeds
    async fn test_connection(&self, target_language: &str) -> Result<(), ProviderError> {
        self.translate("Hello, world.", target_language).await.map(|_| ())
    }
}

/// System instruction shared by the language-model providers
///
/// Fixes the task and forbids commentary so the reply can be used verbatim.
pub fn system_prompt(source_language: &str, target_language: &str) -> String {
    let target = language_utils::display_name(target_language);
    let direction = if language_utils::is_auto(source_language) {
        format!("into {}", target)
    } else {
        format!("from {} into {}", language_utils::display_name(source_language), target)
    };

    format!(
        "You are a professional translator. Translate the text you are given {}. \
         Preserve the meaning, tone and paragraph breaks. \
         Respond only with the translated text, without any explanations, notes or commentary.",
        direction
    )
}

/// Single-turn prompt for providers without a separate system role
pub fn inline_prompt(source_language: &str, target_language: &str, text: &str) -> String {
    format!("{}\n\n{}", system_prompt(source_language, target_language), text)
}

/// Truncate an error body for logging and markers
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX_CHARS: usize = 300;
    if body.chars().count() > MAX_CHARS {
        let head: String = body.chars().take(MAX_CHARS).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}

pub mod anthropic;
pub mod fallback;
pub mod gemini;
pub mod google;
pub mod huggingface;
pub mod mock;
pub mod openai;
