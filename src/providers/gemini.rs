use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Serialize, Deserialize};
use log::error;

use crate::errors::ProviderError;
use super::fallback::FallbackChain;
use super::{Provider, inline_prompt, truncate_body};

/// Google Gemini client for the generative language API
///
/// Each request walks the configured model names in order, see `FallbackChain`.
#[derive(Debug)]
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key, sent in the x-goog-api-key header
    api_key: String,
    /// API base URL
    endpoint: String,
    /// Model names tried in order
    chain: FallbackChain,
    /// Sampling temperature
    temperature: f32,
    /// Output token budget
    max_tokens: u32,
    /// Source language code or "auto"
    source_language: String,
}

/// generateContent request body
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

/// A content entry made of parts
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct GeminiContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// A single text part
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct GeminiPart {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

/// generateContent response body
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

/// One response candidate
#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: GeminiContent,
}

impl GeminiRequest {
    /// Single-turn request carrying the whole prompt in one part
    pub fn new(prompt: impl Into<String>, temperature: f32, max_output_tokens: u32) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt.into() }],
            }],
            generation_config: GenerationConfig { temperature, max_output_tokens },
        }
    }
}

impl Gemini {
    /// Create a new Gemini client
    pub fn new<I, S>(api_key: impl Into<String>, endpoint: impl Into<String>, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            chain: FallbackChain::new(models),
            temperature: 0.1,
            max_tokens: 4096,
            source_language: "auto".to_string(),
        }
    }

    /// Set sampling parameters
    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        self
    }

    /// Set the source language named in the prompt
    pub fn with_source_language(mut self, source_language: impl Into<String>) -> Self {
        self.source_language = source_language.into();
        self
    }

    fn api_url(&self, model: &str) -> String {
        let base = if self.endpoint.is_empty() {
            "https://generativelanguage.googleapis.com"
        } else {
            self.endpoint.trim_end_matches('/')
        };
        format!("{}/v1beta/models/{}:generateContent", base, model)
    }

    /// Send one generateContent call against a specific model
    pub async fn generate(&self, model: &str, request: &GeminiRequest) -> Result<GeminiResponse, ProviderError> {
        let response = self.client.post(self.api_url(model))
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Gemini API error for {} ({}): {}", model, status, truncate_body(&error_text));
            return Err(ProviderError::from_status(status.as_u16(), truncate_body(&error_text)));
        }

        response.json::<GeminiResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Gemini response: {}", e)))
    }

    /// Text of the first part of the first candidate
    pub fn extract_text(response: &GeminiResponse) -> Result<String, ProviderError> {
        response.candidates.first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| ProviderError::ParseError("Gemini returned no candidates".to_string()))
    }
}

#[async_trait]
impl Provider for Gemini {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        let request = GeminiRequest::new(
            inline_prompt(&self.source_language, target_language, text),
            self.temperature,
            self.max_tokens,
        );
        let request = &request;

        self.chain.run(|model| async move {
            let response = self.generate(&model, request).await?;
            Self::extract_text(&response)
        }).await
    }
}
