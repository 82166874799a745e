use anyhow::{Result, Context, anyhow};
use log::{error, warn, info};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle, MultiProgress};

use crate::app_config::Config;
use crate::document::{DocumentWriter, DocxWriter, PdfTextExtractor, TextExtractor};
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::translation::{JobReport, LogEntry, ProgressReporter, TranslationJob, TranslationService};

// @module: Application controller for PDF document translation

/// Name of the log file collecting segment failures, written next to the outputs
pub const ISSUES_LOG_FILE: &str = "pdftwai.issues.log";

/// What happened to one input file
#[derive(Debug)]
pub enum RunOutcome {
    /// The document was translated and written
    Written {
        /// Path of the produced document
        output: PathBuf,
        /// Job summary, including the translated text
        report: JobReport,
    },
    /// An output already existed and overwriting was not requested
    Skipped(PathBuf),
}

/// Totals of a folder run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Progress bar driven by a translation job
struct BarReporter {
    bar: ProgressBar,
}

impl BarReporter {
    fn new(bar: ProgressBar) -> Self {
        Self { bar }
    }
}

impl ProgressReporter for BarReporter {
    fn start(&mut self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
    }

    fn report(&mut self, fraction: f64) {
        let length = self.bar.length().unwrap_or(0);
        self.bar.set_position((fraction * length as f64).round() as u64);
    }
}

fn bar_style(unit: &str) -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}} {{eta}}",
            unit
        ))
        .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░")
}

/// Main application controller for PDF translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Provider plus dispatch profile
    service: TranslationService,
    // @field: Source document reader
    extractor: Box<dyn TextExtractor>,
    // @field: Output document writer
    writer: Box<dyn DocumentWriter>,
    // @field: Draw progress bars
    show_progress: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let service = TranslationService::from_config(&config)?;
        let writer = DocxWriter::new().with_heading(config.document.heading());

        Ok(Self::with_parts(
            config,
            service,
            Box::new(PdfTextExtractor::new()),
            Box::new(writer),
        ))
    }

    /// Assemble a controller from explicit collaborators
    pub fn with_parts(
        config: Config,
        service: TranslationService,
        extractor: Box<dyn TextExtractor>,
        writer: Box<dyn DocumentWriter>,
    ) -> Self {
        Self {
            config,
            service,
            extractor,
            writer,
            show_progress: true,
        }
    }

    /// Enable or disable progress bars
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Output path for an input file: `<stem>.<target>.<ext>` in `output_dir`
    pub fn output_path(&self, input_file: &Path, output_dir: &Path) -> PathBuf {
        FileManager::generate_output_path(
            input_file,
            output_dir,
            &self.config.target_language,
            self.writer.extension(),
        )
    }

    fn new_bar(&self, multi_progress: &MultiProgress, length: u64, unit: &str) -> ProgressBar {
        let bar = if self.show_progress {
            multi_progress.add(ProgressBar::new(length))
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(bar_style(unit));
        bar
    }

    /// Translate a short probe to confirm the provider is reachable
    pub async fn check(&self) -> Result<()> {
        info!(
            "Testing {} with target language {}",
            self.service.provider_name(),
            language_utils::display_name(&self.config.target_language)
        );
        self.service.test_connection(&self.config.target_language).await
            .with_context(|| format!("Failed to connect to {}", self.service.provider_name()))?;
        info!("Successfully connected to {}", self.service.provider_name());
        Ok(())
    }

    /// Extract and translate a document held in memory
    pub async fn translate_bytes(&self, bytes: &[u8], reporter: &mut dyn ProgressReporter) -> Result<JobReport> {
        let text = self.extractor.extract(bytes)?;
        let report = TranslationJob::new(&self.service)
            .run(&text, &self.config.target_language, reporter)
            .await?;
        Ok(report)
    }

    /// Translate one PDF and write the output document
    ///
    /// `output_dir` defaults to the input file's directory.
    pub async fn run(&self, input_file: PathBuf, output_dir: Option<PathBuf>, force_overwrite: bool) -> Result<RunOutcome> {
        let multi_progress = MultiProgress::new();
        self.run_with_progress(&input_file, output_dir, &multi_progress, force_overwrite).await
    }

    async fn run_with_progress(
        &self,
        input_file: &Path,
        output_dir: Option<PathBuf>,
        multi_progress: &MultiProgress,
        force_overwrite: bool,
    ) -> Result<RunOutcome> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_dir = output_dir
            .or_else(|| input_file.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        let output_path = self.output_path(input_file, &output_dir);
        if output_path.exists() && !force_overwrite {
            warn!("Skipping {:?}, translation already exists (use -f to force overwrite)", input_file);
            return Ok(RunOutcome::Skipped(output_path));
        }

        info!(
            "PDFTwAI: {} → {} with {}",
            input_file.display(),
            language_utils::display_name(&self.config.target_language),
            self.service.provider_name()
        );

        let bytes = FileManager::read_bytes(input_file)?;
        let bar = self.new_bar(multi_progress, 0, "segments");
        bar.set_message("Translating");
        let mut reporter = BarReporter::new(bar.clone());

        let result = self.translate_bytes(&bytes, &mut reporter).await;
        bar.finish_and_clear();
        let report = result.with_context(|| format!("Failed to translate {:?}", input_file))?;

        if report.has_failures() {
            warn!(
                "Translation completed with {} failed segments out of {}",
                report.failed_segments, report.total_segments
            );
            let context = format!(
                "{} - {} ({})",
                input_file.display(),
                self.service.provider_name(),
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
            );
            let log_path = output_dir.join(ISSUES_LOG_FILE);
            match self.write_logs_to_file(&report.issues, &log_path, &context) {
                Ok(()) => info!("Issues written to {}", log_path.display()),
                Err(e) => warn!("Failed to write issues log: {}", e),
            }
        }

        let document = self.writer.build(&report.text)?;
        FileManager::write_bytes(&output_path, &document)?;

        info!(
            "Wrote {} ({} segments in {})",
            output_path.display(),
            report.total_segments,
            Self::format_duration(report.elapsed)
        );

        Ok(RunOutcome::Written { output: output_path, report })
    }

    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }

    /// Translate every PDF under `input_dir`
    ///
    /// Files whose output already exists are skipped unless forced. A failing
    /// file is counted and the run moves on to the next one.
    pub async fn run_folder(&self, input_dir: PathBuf, output_dir: Option<PathBuf>, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let pdf_files = FileManager::find_files(&input_dir, "pdf")?;
        if pdf_files.is_empty() {
            return Err(anyhow!("No PDF files found in directory: {:?}", input_dir));
        }

        let multi_progress = MultiProgress::new();
        let folder_pb = self.new_bar(&multi_progress, pdf_files.len() as u64, "files");
        folder_pb.set_message("Processing files");

        let mut summary = FolderSummary::default();

        for pdf_file in &pdf_files {
            let file_name = pdf_file.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let file_output_dir = output_dir.clone()
                .or_else(|| pdf_file.parent().map(Path::to_path_buf));

            match self.run_with_progress(pdf_file, file_output_dir, &multi_progress, force_overwrite).await {
                Ok(RunOutcome::Written { .. }) => summary.processed += 1,
                Ok(RunOutcome::Skipped(_)) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.failed += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        let summary_message = format!(
            "Folder processing completed: {} processed, {} skipped, {} errors",
            summary.processed, summary.skipped, summary.failed
        );
        info!("{} in {}", summary_message, Self::format_duration(start_time.elapsed()));

        Ok(summary)
    }

    /// Append captured log entries to an issues log file
    fn write_logs_to_file(&self, logs: &[LogEntry], file_path: &Path, translation_context: &str) -> Result<()> {
        FileManager::append_to_log_file(file_path, &format!("Context: {}", translation_context))?;
        for entry in logs {
            FileManager::append_to_log_file(file_path, &format!("[{}] {}", entry.level.to_uppercase(), entry.message))?;
        }
        Ok(())
    }
}
