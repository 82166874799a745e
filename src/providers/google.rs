/*!
 * Free Google web translation client.
 *
 * Uses the public `translate_a/single` endpoint the browser widget talks to. No
 * credential, one attempt per segment. The endpoint rejects payloads above
 * roughly 5000 characters, which is why this backend chunks by characters.
 */

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use log::error;

use crate::errors::ProviderError;
use crate::language_utils;
use super::{Provider, truncate_body};

/// Google web translation client
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for requests
    client: Client,
    /// Base URL of the translation host
    endpoint: String,
    /// Source language code or "auto"
    source_language: String,
}

impl GoogleTranslate {
    /// Create a new client against the given host
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            source_language: "auto".to_string(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        self
    }

    /// Set the source language; "auto" lets the service detect it
    pub fn with_source_language(mut self, source_language: impl Into<String>) -> Self {
        self.source_language = source_language.into();
        self
    }

    fn api_url(&self) -> String {
        let base = if self.endpoint.is_empty() {
            "https://translate.googleapis.com"
        } else {
            self.endpoint.trim_end_matches('/')
        };
        format!("{}/translate_a/single", base)
    }

    fn source_code(&self) -> String {
        if language_utils::is_auto(&self.source_language) {
            "auto".to_string()
        } else {
            language_utils::to_web_code(&self.source_language)
                .unwrap_or_else(|_| "auto".to_string())
        }
    }

    /// Pull the translated sentences out of the nested-array response
    ///
    /// The body looks like `[[["Hola","Hello",null,null,1],["mundo","world",...]],null,"en",...]`;
    /// the translation is the concatenation of the first element of every entry
    /// in the first array.
    pub fn parse_response(body: &Value) -> Result<String, ProviderError> {
        let sentences = body.get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("Unexpected translation response shape".to_string()))?;

        let translated: String = sentences.iter()
            .filter_map(|sentence| sentence.get(0).and_then(Value::as_str))
            .collect();

        if translated.trim().is_empty() {
            return Err(ProviderError::ParseError("Google Translate returned no text".to_string()));
        }
        Ok(translated)
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    fn name(&self) -> &str {
        "Google Translate"
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let target = language_utils::to_web_code(target_language)
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        let source = self.source_code();

        // POST keeps long segments out of the URL
        let response = self.client.post(self.api_url())
            .query(&[("client", "gtx"), ("sl", source.as_str()), ("tl", target.as_str()), ("dt", "t")])
            .form(&[("q", text)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Google Translate error ({}): {}", status, truncate_body(&error_text));
            return Err(ProviderError::from_status(status.as_u16(), truncate_body(&error_text)));
        }

        let body: Value = response.json().await
            .map_err(|e| ProviderError::ParseError(format!("Google Translate response: {}", e)))?;

        Self::parse_response(&body)
    }
}
