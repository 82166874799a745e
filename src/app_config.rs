use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use url::Url;


/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO) or "auto"
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO)
    pub target_language: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Output document config
    #[serde(default)]
    pub document: DocumentConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Free Google web translation
    #[default]
    Google,
    // @provider: OpenAI chat completions
    OpenAI,
    // @provider: Anthropic messages
    Anthropic,
    // @provider: Google Gemini (free tier)
    Gemini,
    // @provider: Hugging Face hosted inference
    HuggingFace,
}

impl TranslationProvider {
    /// All supported providers, in default listing order
    pub const ALL: [TranslationProvider; 5] = [
        Self::Google,
        Self::OpenAI,
        Self::Anthropic,
        Self::Gemini,
        Self::HuggingFace,
    ];

    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google Translate",
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Gemini => "Gemini",
            Self::HuggingFace => "Hugging Face",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::OpenAI => "openai".to_string(),
            Self::Anthropic => "anthropic".to_string(),
            Self::Gemini => "gemini".to_string(),
            Self::HuggingFace => "huggingface".to_string(),
        }
    }

    /// Whether the provider is backed by a language model and needs a credential
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, Self::Google)
    }

    /// Environment variable consulted when no API key is configured
    pub fn api_key_env_var(&self) -> Option<&'static str> {
        match self {
            Self::Google => None,
            Self::OpenAI => Some("OPENAI_API_KEY"),
            Self::Anthropic => Some("ANTHROPIC_API_KEY"),
            Self::Gemini => Some("GEMINI_API_KEY"),
            Self::HuggingFace => Some("HF_TOKEN"),
        }
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            "gemini" => Ok(Self::Gemini),
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Output token budget per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    // @field: Sampling temperature
    #[serde(default)]
    pub temperature: f32,

    // @field: Segment size override (characters or words, per provider unit)
    #[serde(default)]
    pub chunk_limit: Option<usize>,

    // @field: Inter-segment delay override in milliseconds
    #[serde(default)]
    pub delay_ms: Option<u64>,

    // @field: Alternate model identifiers tried after `model`
    #[serde(default)]
    pub fallback_models: Vec<String>,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::Google => Self {
                provider_type: "google".to_string(),
                model: String::new(),
                api_key: String::new(),
                endpoint: default_google_endpoint(),
                timeout_secs: default_timeout_secs(),
                max_tokens: 0,
                temperature: 0.0,
                chunk_limit: None,
                delay_ms: None,
                fallback_models: Vec::new(),
            },
            TranslationProvider::OpenAI => Self {
                provider_type: "openai".to_string(),
                model: default_openai_model(),
                api_key: String::new(),
                endpoint: default_openai_endpoint(),
                timeout_secs: default_timeout_secs(),
                max_tokens: default_max_tokens(),
                temperature: 0.1,
                chunk_limit: None,
                delay_ms: None,
                fallback_models: Vec::new(),
            },
            TranslationProvider::Anthropic => Self {
                provider_type: "anthropic".to_string(),
                model: default_anthropic_model(),
                api_key: String::new(),
                endpoint: default_anthropic_endpoint(),
                timeout_secs: default_anthropic_timeout_secs(),
                max_tokens: default_max_tokens(),
                temperature: 0.0,
                chunk_limit: None,
                delay_ms: None,
                fallback_models: Vec::new(),
            },
            TranslationProvider::Gemini => Self {
                provider_type: "gemini".to_string(),
                model: default_gemini_model(),
                api_key: String::new(),
                endpoint: default_gemini_endpoint(),
                timeout_secs: default_timeout_secs(),
                max_tokens: default_max_tokens(),
                temperature: 0.0,
                chunk_limit: None,
                delay_ms: None,
                fallback_models: default_gemini_fallback_models(),
            },
            TranslationProvider::HuggingFace => Self {
                provider_type: "huggingface".to_string(),
                model: default_huggingface_model(),
                api_key: String::new(),
                endpoint: default_huggingface_endpoint(),
                timeout_secs: default_anthropic_timeout_secs(),
                max_tokens: default_huggingface_max_tokens(),
                temperature: 0.0,
                chunk_limit: None,
                delay_ms: None,
                fallback_models: Vec::new(),
            },
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,
}

/// Output document settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DocumentConfig {
    /// Heading placed above the translated paragraphs
    #[serde(default = "default_document_title")]
    pub title: String,

    /// Whether to emit the heading at all
    #[serde(default = "default_true")]
    pub include_title: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: default_document_title(),
            include_title: true,
        }
    }
}

impl DocumentConfig {
    /// The heading to write, if any
    pub fn heading(&self) -> Option<&str> {
        if self.include_title && !self.title.trim().is_empty() {
            Some(self.title.as_str())
        } else {
            None
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_source_language() -> String {
    "auto".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_anthropic_timeout_secs() -> u64 {
    60
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_huggingface_max_tokens() -> u32 {
    1024
}

fn default_true() -> bool {
    true
}

fn default_document_title() -> String {
    "Translation".to_string()
}

fn default_google_endpoint() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_anthropic_endpoint() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_huggingface_endpoint() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-5-sonnet-20240620".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_gemini_fallback_models() -> Vec<String> {
    // The same model has been published under several names across API versions
    vec![
        "gemini-1.5-flash-latest".to_string(),
        "gemini-1.5-flash-001".to_string(),
        "gemini-pro".to_string(),
    ]
}

fn default_huggingface_model() -> String {
    "mistralai/Mistral-7B-Instruct-v0.2".to_string()
}

impl Config {

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        crate::language_utils::validate_language_code(&self.target_language)?;
        if !crate::language_utils::is_auto(&self.source_language) {
            crate::language_utils::validate_language_code(&self.source_language)?;
        }

        // LLM providers fail fast without a credential
        let provider = self.translation.provider;
        if provider.requires_api_key() && self.translation.get_api_key().is_empty() {
            return Err(anyhow!(
                "Translation API key is required for {} provider",
                provider.display_name()
            ));
        }

        if self.translation.get_chunk_limit() == Some(0) {
            return Err(anyhow!("chunk_limit must be greater than zero"));
        }

        let endpoint = self.translation.get_endpoint();
        if !endpoint.is_empty() {
            Url::parse(&endpoint)
                .map_err(|e| anyhow!("Invalid endpoint '{}' for {} provider: {}", endpoint, provider.display_name(), e))?;
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: "es".to_string(),
            translation: TranslationConfig::default(),
            document: DocumentConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Mutable access to the active provider, inserting defaults when it is not listed
    pub fn active_provider_config_mut(&mut self) -> &mut ProviderConfig {
        let provider_str = self.provider.to_lowercase_string();
        let position = self.available_providers.iter()
            .position(|p| p.provider_type == provider_str);
        let index = match position {
            Some(index) => index,
            None => {
                self.available_providers.push(ProviderConfig::new(self.provider));
                self.available_providers.len() - 1
            }
        };
        &mut self.available_providers[index]
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &TranslationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    fn defaults(&self) -> ProviderConfig {
        ProviderConfig::new(self.provider)
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        self.defaults().model
    }

    /// Get the API key for the active provider, falling back to its environment variable
    pub fn get_api_key(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.api_key.is_empty() {
                return provider_config.api_key.clone();
            }
        }

        self.provider.api_key_env_var()
            .and_then(|var| std::env::var(var).ok())
            .map(|key| key.trim().to_string())
            .unwrap_or_default()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        self.defaults().endpoint
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        match self.get_active_provider_config() {
            Some(provider_config) if provider_config.timeout_secs > 0 => provider_config.timeout_secs,
            _ => self.defaults().timeout_secs,
        }
    }

    /// Get the output token budget for the active provider
    pub fn get_max_tokens(&self) -> u32 {
        match self.get_active_provider_config() {
            Some(provider_config) if provider_config.max_tokens > 0 => provider_config.max_tokens,
            _ => self.defaults().max_tokens,
        }
    }

    /// Get the sampling temperature for the active provider
    pub fn get_temperature(&self) -> f32 {
        self.get_active_provider_config()
            .map(|p| p.temperature)
            .unwrap_or_else(|| self.defaults().temperature)
    }

    /// Get the configured segment size override, if any
    pub fn get_chunk_limit(&self) -> Option<usize> {
        self.get_active_provider_config().and_then(|p| p.chunk_limit)
    }

    /// Get the configured delay override, if any
    pub fn get_delay_ms(&self) -> Option<u64> {
        self.get_active_provider_config().and_then(|p| p.delay_ms)
    }

    /// Candidate model identifiers, primary model first, duplicates removed
    pub fn get_model_candidates(&self) -> Vec<String> {
        let fallbacks = match self.get_active_provider_config() {
            Some(provider_config) => provider_config.fallback_models.clone(),
            None => self.defaults().fallback_models,
        };

        let mut candidates = vec![self.get_model()];
        for model in fallbacks {
            if !model.is_empty() && !candidates.contains(&model) {
                candidates.push(model);
            }
        }
        candidates
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            available_providers: TranslationProvider::ALL.iter()
                .map(|provider| ProviderConfig::new(*provider))
                .collect(),
        }
    }
}
