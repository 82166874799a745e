/*!
 * Tests for file utility functions
 */

use std::fs;
use std::path::Path;
use anyhow::Result;
use pdftwai::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that generate_output_path creates the correct path
#[test]
fn test_generate_output_path_withValidInputs_shouldCreateCorrectPath() {
    let input_file = Path::new("/tmp/input/report.pdf");
    let output_dir = Path::new("/tmp/output");

    let output_path = FileManager::generate_output_path(input_file, output_dir, "fr", "docx");
    assert_eq!(output_path, Path::new("/tmp/output/report.fr.docx"));

    let dotted = FileManager::generate_output_path(input_file, output_dir, "de", ".docx");
    assert_eq!(dotted, Path::new("/tmp/output/report.de.docx"));
}

/// Test that find_files is recursive, case-insensitive and sorted
#[test]
fn test_find_files_withNestedPdfs_shouldReturnSortedMatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "b.pdf", "b")?;
    common::create_test_file(temp_dir.path(), "a.PDF", "a")?;
    common::create_test_file(temp_dir.path(), "nested/c.pdf", "c")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "n")?;

    let files = FileManager::find_files(temp_dir.path(), "pdf")?;
    let names: Vec<String> = files.iter()
        .map(|p| p.strip_prefix(temp_dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();

    assert_eq!(names, vec!["a.PDF", "b.pdf", "nested/c.pdf"]);
    Ok(())
}

/// Test that write_bytes creates missing parent directories
#[test]
fn test_write_bytes_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("deep/er/out.bin");

    FileManager::write_bytes(&target, b"PK\x03\x04")?;

    assert_eq!(FileManager::read_bytes(&target)?, b"PK\x03\x04");
    Ok(())
}

/// Test that read_bytes reports missing files
#[test]
fn test_read_bytes_withMissingFile_shouldFail() {
    let result = FileManager::read_bytes("definitely/not/here.pdf");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("does not exist"));
}

/// Test that the log file is appended to with timestamps
#[test]
fn test_append_to_log_file_shouldAppendTimestampedLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let log = temp_dir.path().join("issues.log");

    FileManager::append_to_log_file(&log, "first")?;
    FileManager::append_to_log_file(&log, "second")?;

    let content = fs::read_to_string(&log)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('[') && lines[0].ends_with("] first"));
    assert!(lines[1].ends_with("] second"));
    Ok(())
}

/// Test the PDF extension check
#[test]
fn test_is_pdf_path_shouldIgnoreCase() {
    assert!(FileManager::is_pdf_path("paper.pdf"));
    assert!(FileManager::is_pdf_path("PAPER.PDF"));
    assert!(!FileManager::is_pdf_path("paper.docx"));
    assert!(!FileManager::is_pdf_path("pdf"));
}
