/*!
 * Common test utilities for the pdftwai test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use std::sync::Once;
use std::time::Duration;
use anyhow::Result;
use tempfile::TempDir;

use pdftwai::app_config::{Config, TranslationProvider};
use pdftwai::app_controller::Controller;
use pdftwai::document::{DocxWriter, TextExtractor};
use pdftwai::errors::DocumentError;
use pdftwai::providers::mock::MockProvider;
use pdftwai::translation::{ChunkUnit, JoinPolicy, ProgressReporter, ProviderProfile, TranslationService};

static LOGGER: Once = Once::new();

/// Route library logs to the test harness output
pub fn init_logger() {
    LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// `count` distinct words separated by single spaces
pub fn numbered_words(count: usize) -> String {
    (0..count).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ")
}

/// Extractor that treats the file bytes as UTF-8 text
///
/// Lets controller tests run on plain `.pdf`-named text files.
#[derive(Debug, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, DocumentError> {
        let text = String::from_utf8(bytes.to_vec())
            .map_err(|e| DocumentError::Extraction(e.to_string()))?;
        if text.trim().is_empty() {
            return Err(DocumentError::Empty);
        }
        Ok(text)
    }
}

/// Reporter that keeps every update
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub total: Option<usize>,
    pub fractions: Vec<f64>,
}

impl ProgressReporter for RecordingReporter {
    fn start(&mut self, total: usize) {
        self.total = Some(total);
    }

    fn report(&mut self, fraction: f64) {
        self.fractions.push(fraction);
    }
}

/// Profile with the given split policy and no delay
pub fn test_profile(limit: usize, unit: ChunkUnit, join: JoinPolicy) -> ProviderProfile {
    let mut profile = ProviderProfile::for_provider(TranslationProvider::Google);
    profile.chunk_limit = limit;
    profile.chunk_unit = unit;
    profile.join = join;
    profile.delay = Duration::ZERO;
    profile
}

/// Translation service backed by a mock provider
pub fn mock_service(provider: MockProvider, limit: usize, unit: ChunkUnit, join: JoinPolicy) -> TranslationService {
    TranslationService::with_provider(Box::new(provider), test_profile(limit, unit, join))
}

/// Controller backed by a mock provider and the plain-text extractor
pub fn mock_controller(provider: MockProvider, limit: usize, unit: ChunkUnit) -> Controller {
    let config = Config {
        target_language: "fr".to_string(),
        ..Config::default()
    };
    Controller::with_parts(
        config,
        mock_service(provider, limit, unit, JoinPolicy::BlankLine),
        Box::new(PlainTextExtractor),
        Box::new(DocxWriter::new().with_heading(Some("Translation"))),
    )
    .with_progress(false)
}
