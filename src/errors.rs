/*!
 * Error types for the pdftwai application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 *
 * Two families matter to the translation pipeline:
 * - `ProviderError` never escapes a single segment; the translation service turns
 *   it into an inline `[Error: ...]` marker.
 * - `TranslationError` and `DocumentError` are job-start failures that abort
 *   before any segment is dispatched.
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// Every candidate model of a fallback chain failed
    #[error("All {attempts} candidate models failed, last error: {last_error}")]
    FallbackExhausted {
        /// Number of candidates tried
        attempts: usize,
        /// Description of the final failure
        last_error: String,
    },
}

impl ProviderError {
    /// Map a non-success HTTP status and body onto the matching variant
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            429 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        // Request URLs may carry credentials
        let error = error.without_url();
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors that can occur while reading the source PDF or writing the output document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The PDF could not be parsed
    #[error("Failed to extract text from PDF: {0}")]
    Extraction(String),

    /// The PDF parsed but contained no text
    #[error("Document contains no extractable text")]
    Empty,

    /// The output document could not be produced
    #[error("Failed to build output document: {0}")]
    Write(String),
}

/// Job-start errors: any of these aborts a job before the first segment
#[derive(Error, Debug)]
pub enum TranslationError {
    /// An LLM provider was selected without an API key
    #[error("API key is required for the {provider} provider")]
    MissingCredential {
        /// Display name of the provider
        provider: String,
    },

    /// The target or source language is not a recognised ISO code
    #[error("Invalid language code: {0}")]
    InvalidLanguage(String),

    /// A segment limit of zero can never make progress
    #[error("Chunk limit must be greater than zero")]
    InvalidChunkLimit,

    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error with the source or output document
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from document processing
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
