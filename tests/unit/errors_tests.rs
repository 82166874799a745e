/*!
 * Tests for error types
 */

use pdftwai::errors::{AppError, DocumentError, ProviderError, TranslationError};

/// HTTP status codes map onto the matching provider error
#[test]
fn test_provider_error_from_status_shouldClassifyCodes() {
    assert!(matches!(ProviderError::from_status(401, "bad key"), ProviderError::AuthenticationError(_)));
    assert!(matches!(ProviderError::from_status(429, "slow down"), ProviderError::RateLimitExceeded(_)));
    assert!(matches!(
        ProviderError::from_status(404, "no model"),
        ProviderError::ApiError { status_code: 404, .. }
    ));
}

/// The messages users see in error markers stay descriptive
#[test]
fn test_error_display_shouldDescribeCause() {
    let exhausted = ProviderError::FallbackExhausted { attempts: 4, last_error: "404".to_string() };
    assert_eq!(exhausted.to_string(), "All 4 candidate models failed, last error: 404");

    let missing = TranslationError::MissingCredential { provider: "OpenAI".to_string() };
    assert_eq!(missing.to_string(), "API key is required for the OpenAI provider");

    assert_eq!(DocumentError::Empty.to_string(), "Document contains no extractable text");
}

/// Errors convert into the application-wide error
#[test]
fn test_app_error_conversions_shouldWrapSources() {
    let from_document: AppError = DocumentError::Extraction("bad xref".to_string()).into();
    assert!(matches!(from_document, AppError::Document(_)));

    let from_translation: AppError = TranslationError::InvalidChunkLimit.into();
    assert!(from_translation.to_string().starts_with("Translation error:"));

    let from_io: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(from_io, AppError::File(_)));

    let from_anyhow: AppError = anyhow::anyhow!("odd").into();
    assert!(matches!(from_anyhow, AppError::Unknown(_)));
}
