use std::io::Cursor;
use docx_rs::{Docx, Paragraph, Run};
use log::debug;

use crate::errors::DocumentError;
use crate::translation::reassembler::paragraphs;

/// Half-point font size of the title heading (16pt)
const HEADING_SIZE: usize = 32;

/// Produces the downloadable output document
pub trait DocumentWriter: Send + Sync {
    /// Encode `text` as a document, one paragraph per non-blank line
    fn build(&self, text: &str) -> Result<Vec<u8>, DocumentError>;

    /// File extension of produced documents, without the dot
    fn extension(&self) -> &'static str;
}

/// Word (.docx) document writer
#[derive(Debug, Clone, Default)]
pub struct DocxWriter {
    heading: Option<String>,
}

impl DocxWriter {
    /// A writer that emits only the text paragraphs
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a bold heading above the paragraphs
    pub fn with_heading(mut self, heading: Option<&str>) -> Self {
        self.heading = heading.map(str::to_string);
        self
    }

    pub fn heading(&self) -> Option<&str> {
        self.heading.as_deref()
    }
}

impl DocumentWriter for DocxWriter {
    fn build(&self, text: &str) -> Result<Vec<u8>, DocumentError> {
        let mut docx = Docx::new();

        if let Some(heading) = &self.heading {
            docx = docx.add_paragraph(
                Paragraph::new().add_run(Run::new().add_text(heading.as_str()).bold().size(HEADING_SIZE)),
            );
        }

        let lines = paragraphs(text);
        debug!("Writing {} paragraphs to docx", lines.len());
        for line in lines {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line)));
        }

        let mut buffer = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buffer)
            .map_err(|e| DocumentError::Write(e.to_string()))?;

        Ok(buffer.into_inner())
    }

    fn extension(&self) -> &'static str {
        "docx"
    }
}
