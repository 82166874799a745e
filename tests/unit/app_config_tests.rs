/*!
 * Tests for application configuration
 */

use anyhow::Result;
use std::time::Duration;
use pdftwai::app_config::{Config, LogLevel, ProviderConfig, TranslationProvider};
use pdftwai::translation::{ChunkUnit, JoinPolicy, ProviderProfile};

/// Default config translates into Spanish with the free web translator
#[test]
fn test_default_config_shouldUseGoogleAndValidate() -> Result<()> {
    let config = Config::default();

    assert_eq!(config.source_language, "auto");
    assert_eq!(config.target_language, "es");
    assert_eq!(config.translation.provider, TranslationProvider::Google);
    assert_eq!(config.translation.available_providers.len(), TranslationProvider::ALL.len());
    assert_eq!(config.log_level, LogLevel::Info);
    config.validate()?;

    Ok(())
}

/// A minimal JSON file picks up defaults for everything it omits
#[test]
fn test_config_fromMinimalJson_shouldFillDefaults() -> Result<()> {
    let json = r#"{
        "target_language": "de",
        "translation": {
            "provider": "gemini",
            "available_providers": [
                { "type": "gemini", "api_key": "g-key", "delay_ms": 6000 }
            ]
        }
    }"#;

    let config: Config = serde_json::from_str(json)?;

    assert_eq!(config.source_language, "auto");
    assert_eq!(config.document.title, "Translation");
    assert!(config.document.include_title);
    assert_eq!(config.translation.get_api_key(), "g-key");
    assert_eq!(config.translation.get_model(), "gemini-1.5-flash");
    assert_eq!(config.translation.get_delay_ms(), Some(6000));
    config.validate()?;

    let profile = ProviderProfile::from_config(&config.translation);
    assert_eq!(profile.delay, Duration::from_millis(6000));
    assert_eq!(profile.chunk_limit, 1000);

    Ok(())
}

/// Serialized default config can be read back
#[test]
fn test_config_serialization_shouldRoundTripProviderList() -> Result<()> {
    let json = serde_json::to_string_pretty(&Config::default())?;
    assert!(json.contains("\"type\": \"huggingface\""));

    let parsed: Config = serde_json::from_str(&json)?;
    assert_eq!(parsed.translation.available_providers.len(), 5);
    Ok(())
}

/// LLM providers refuse to validate without a key
#[test]
fn test_validate_withLlmProviderAndNoKey_shouldFail() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::HuggingFace;
    config.translation.active_provider_config_mut().api_key.clear();
    // SAFETY: no other test reads this variable concurrently
    unsafe { std::env::remove_var("HF_TOKEN"); }

    let error = config.validate().unwrap_err();
    assert!(error.to_string().contains("Hugging Face"));
}

/// A chunk limit of zero is a configuration error
#[test]
fn test_validate_withZeroChunkLimit_shouldFail() {
    let mut config = Config::default();
    config.translation.active_provider_config_mut().chunk_limit = Some(0);
    assert!(config.validate().is_err());
}

/// Each provider has its own dispatch defaults
#[test]
fn test_provider_profiles_shouldMatchProviderConstraints() {
    let google = ProviderProfile::for_provider(TranslationProvider::Google);
    assert_eq!((google.chunk_limit, google.chunk_unit), (4500, ChunkUnit::Characters));
    assert_eq!(google.join, JoinPolicy::Newline);

    let anthropic = ProviderProfile::for_provider(TranslationProvider::Anthropic);
    let openai = ProviderProfile::for_provider(TranslationProvider::OpenAI);
    assert!(anthropic.chunk_limit < openai.chunk_limit);
    assert_eq!(openai.delay, Duration::from_secs(1));

    let gemini = ProviderProfile::for_provider(TranslationProvider::Gemini);
    assert_eq!(gemini.delay, Duration::from_secs(4));

    let hugging_face = ProviderProfile::for_provider(TranslationProvider::HuggingFace);
    assert_eq!(hugging_face.delay, Duration::from_millis(500));
    assert_eq!(hugging_face.join, JoinPolicy::BlankLine);
}

/// Provider defaults carry the expected models
#[test]
fn test_provider_config_new_shouldSetModelDefaults() {
    assert_eq!(ProviderConfig::new(TranslationProvider::OpenAI).model, "gpt-4o-mini");
    assert_eq!(ProviderConfig::new(TranslationProvider::Anthropic).temperature, 0.0);
    assert_eq!(ProviderConfig::new(TranslationProvider::Gemini).fallback_models.len(), 3);
    assert!(ProviderConfig::new(TranslationProvider::Google).model.is_empty());
}
