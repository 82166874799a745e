use std::panic::{self, AssertUnwindSafe};
use log::debug;

use crate::errors::DocumentError;

/// Pulls the text of a source document out of its raw bytes
pub trait TextExtractor: Send + Sync {
    /// All pages concatenated in page order
    fn extract(&self, bytes: &[u8]) -> Result<String, DocumentError>;
}

/// Text extractor for PDF files
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Whether `bytes` start with the `%PDF` signature
    pub fn is_pdf(bytes: &[u8]) -> bool {
        bytes.starts_with(b"%PDF")
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, DocumentError> {
        if !Self::is_pdf(bytes) {
            return Err(DocumentError::Extraction("missing %PDF signature".to_string()));
        }

        // The parser panics on some malformed cross-reference tables
        let text = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)))
            .map_err(|_| DocumentError::Extraction("PDF parser aborted on malformed input".to_string()))?
            .map_err(|e| DocumentError::Extraction(e.to_string()))?;

        if text.trim().is_empty() {
            return Err(DocumentError::Empty);
        }

        debug!("Extracted {} characters from PDF", text.chars().count());
        Ok(text)
    }
}
