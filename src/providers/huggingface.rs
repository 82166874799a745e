use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use log::{error, warn};

use crate::errors::ProviderError;
use super::{Provider, inline_prompt, truncate_body};

/// Hugging Face hosted inference client
///
/// Text-generation models answer with a free-form JSON shape that differs per
/// model and per deployment, so responses are read from a `serde_json::Value`.
#[derive(Debug)]
pub struct HuggingFace {
    /// HTTP client for API requests
    client: Client,
    /// Access token
    api_key: String,
    /// Inference API base URL
    endpoint: String,
    /// Model repository id, e.g. `mistralai/Mistral-7B-Instruct-v0.2`
    model: String,
    /// Output token budget
    max_new_tokens: u32,
    /// Source language code or "auto"
    source_language: String,
}

/// Text-generation request body
#[derive(Debug, Serialize)]
pub struct HuggingFaceRequest {
    inputs: String,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    return_full_text: bool,
}

impl HuggingFaceRequest {
    pub fn new(inputs: impl Into<String>, max_new_tokens: u32) -> Self {
        Self {
            inputs: inputs.into(),
            parameters: GenerationParameters {
                max_new_tokens,
                return_full_text: false,
            },
        }
    }
}

impl HuggingFace {
    /// Create a new Hugging Face client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
            max_new_tokens: 1024,
            source_language: "auto".to_string(),
        }
    }

    /// Set the output token budget
    pub fn with_max_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
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

    fn api_url(&self) -> String {
        let base = if self.endpoint.is_empty() {
            "https://api-inference.huggingface.co"
        } else {
            self.endpoint.trim_end_matches('/')
        };
        format!("{}/models/{}", base, self.model)
    }

    /// Pull the generated text out of an inference response
    ///
    /// Accepts `[{"generated_text": ..}]` and the bare `{"generated_text": ..}`
    /// some deployments return. Models that ignore `return_full_text` echo the
    /// prompt, which is stripped. Any other shape, including the `{"error": ..}`
    /// body sent while a model is loading, is a connection failure.
    pub fn parse_response(body: &Value, prompt: &str) -> Result<String, ProviderError> {
        let generated = match body {
            Value::Array(items) => items.first().and_then(|item| item.get("generated_text")),
            Value::Object(_) => body.get("generated_text"),
            _ => None,
        }
        .and_then(Value::as_str);

        let generated = match generated {
            Some(text) => text,
            None => {
                let detail = body.get("error")
                    .and_then(Value::as_str)
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| truncate_body(&body.to_string()));
                return Err(ProviderError::ConnectionError(format!(
                    "Unexpected Hugging Face response: {}", detail
                )));
            }
        };

        let text = generated.strip_prefix(prompt).unwrap_or(generated).trim();
        if text.is_empty() {
            warn!("Hugging Face returned an empty generation");
            return Err(ProviderError::ParseError("Hugging Face returned an empty generation".to_string()));
        }
        Ok(text.to_string())
    }
}

#[async_trait]
impl Provider for HuggingFace {
    fn name(&self) -> &str {
        "Hugging Face"
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        let prompt = inline_prompt(&self.source_language, target_language, text);
        let request = HuggingFaceRequest::new(prompt.as_str(), self.max_new_tokens);

        let response = self.client.post(self.api_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Hugging Face API error ({}): {}", status, truncate_body(&error_text));
            return Err(ProviderError::from_status(status.as_u16(), truncate_body(&error_text)));
        }

        let body: Value = response.json().await
            .map_err(|e| ProviderError::ParseError(format!("Hugging Face response: {}", e)))?;

        Self::parse_response(&body, &prompt)
    }
}
