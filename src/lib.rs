/*!
 * # PDFTwAI - PDF Translation with AI
 *
 * A Rust library for translating the text of PDF documents into Word documents.
 *
 * ## Features
 *
 * - Extract the text of PDF files
 * - Translate it using one of several providers:
 *   - Google web translation (no key)
 *   - OpenAI API
 *   - Anthropic API
 *   - Google Gemini API, with model-name fallback
 *   - Hugging Face inference API
 * - Provider-sized segments, sent one at a time with a fixed delay
 * - Failed segments stay visible inline as `[Error: ...]` markers
 * - ISO 639-1 and ISO 639-3 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: PDF text extraction and .docx output
 * - `translation`: The chunked translation pipeline:
 *   - `translation::chunker`: Splitting text into segments
 *   - `translation::core`: Translation service and segment outcomes
 *   - `translation::governor`: Delay between provider calls
 *   - `translation::orchestrator`: The per-segment job loop
 *   - `translation::reassembler`: Joining the results
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `providers`: Client implementations for the translation providers
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod document;
pub mod translation;
pub mod app_controller;
pub mod language_utils;
pub mod providers;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::{Config, TranslationProvider};
pub use app_controller::Controller;
pub use document::{DocumentWriter, DocxWriter, PdfTextExtractor, TextExtractor};
pub use translation::{JobReport, ProgressReporter, TranslationJob, TranslationService};
pub use language_utils::{display_name, get_language_name};
pub use errors::{AppError, DocumentError, ProviderError, TranslationError};
