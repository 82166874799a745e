/*!
 * Sequential translation job.
 *
 * A `TranslationJob` splits the document text, sends every segment to the
 * provider one at a time in index order, waits on the rate governor between
 * calls, reports progress after every segment, and joins the results.
 */

use std::time::{Duration, Instant};
use log::{debug, info};

use crate::errors::TranslationError;
use super::chunker::Segment;
use super::core::{LogEntry, SegmentResult, TranslationService};
use super::governor::RateGovernor;
use super::reassembler::Reassembler;

/// Where a job is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Idle,
    Splitting,
    /// Working on the segment with this index
    Translating(usize),
    Done,
}

/// Completed segments out of the total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JobProgress {
    pub completed: usize,
    pub total: usize,
}

impl JobProgress {
    /// Fraction in [0, 1]; a job without segments counts as complete
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed >= self.total
    }
}

/// Receives progress updates while a job runs
pub trait ProgressReporter: Send {
    /// Called once, after splitting, with the number of segments
    fn start(&mut self, _total: usize) {}

    /// Called once per completed segment with the new completion fraction
    fn report(&mut self, fraction: f64);
}

/// Reporter that ignores every update
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&mut self, _fraction: f64) {}
}

/// Adapts a closure into a `ProgressReporter`
pub struct FnReporter<F> {
    callback: F,
}

impl<F: FnMut(f64) + Send> FnReporter<F> {
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F: FnMut(f64) + Send> ProgressReporter for FnReporter<F> {
    fn report(&mut self, fraction: f64) {
        (self.callback)(fraction)
    }
}

/// Summary of a finished job
#[derive(Debug, Clone)]
pub struct JobReport {
    /// Reassembled translated text
    pub text: String,
    /// Per-segment outcomes, in index order
    pub results: Vec<SegmentResult>,
    /// Number of segments the text was split into
    pub total_segments: usize,
    /// Segments that carry an error marker
    pub failed_segments: usize,
    /// Wall-clock time of the whole job
    pub elapsed: Duration,
    /// Segment failures, for the issues log
    pub issues: Vec<LogEntry>,
}

impl JobReport {
    pub fn has_failures(&self) -> bool {
        self.failed_segments > 0
    }
}

/// One end-to-end translation of a document's text
///
/// The job is consumed by `run` and cannot be reused.
#[derive(Debug)]
pub struct TranslationJob<'a> {
    service: &'a TranslationService,
    governor: RateGovernor,
    state: JobState,
    progress: JobProgress,
}

impl<'a> TranslationJob<'a> {
    /// Create a job that throttles with the service's profile delay
    pub fn new(service: &'a TranslationService) -> Self {
        Self {
            governor: RateGovernor::new(service.profile().delay),
            service,
            state: JobState::Idle,
            progress: JobProgress::default(),
        }
    }

    /// Replace the rate governor
    pub fn with_governor(mut self, governor: RateGovernor) -> Self {
        self.governor = governor;
        self
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn progress(&self) -> JobProgress {
        self.progress
    }

    /// Translate `text` into `target_language`
    ///
    /// Segment failures never abort the job: each one leaves an inline marker
    /// and an entry in `JobReport::issues`. Only an invalid chunk policy fails.
    pub async fn run(
        mut self,
        text: &str,
        target_language: &str,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<JobReport, TranslationError> {
        let started = Instant::now();
        let profile = self.service.profile().clone();

        self.state = JobState::Splitting;
        let segments: Vec<Segment> = profile.chunk_policy()?.split(text);
        let total = segments.len();
        self.progress = JobProgress { completed: 0, total };
        reporter.start(total);

        info!(
            "Translating {} segments with {} (limit {} {})",
            total, self.service.provider_name(), profile.chunk_limit, profile.chunk_unit
        );

        let mut results: Vec<SegmentResult> = Vec::with_capacity(total);
        let mut issues = Vec::new();

        for segment in segments {
            self.state = JobState::Translating(segment.index);
            debug!("Segment {}/{} ({} {})", segment.index + 1, total, segment.size, profile.chunk_unit);

            let outcome = self.service.translate_segment(&segment.content, target_language).await;
            if let Some(e) = outcome.error() {
                issues.push(LogEntry {
                    level: "error".to_string(),
                    message: format!("Segment {}/{} failed: {}", segment.index + 1, total, e),
                });
            }
            results.push(SegmentResult { index: segment.index, outcome });

            self.progress.completed += 1;
            reporter.report(self.progress.fraction());

            if !self.progress.is_complete() {
                self.governor.wait().await;
            }
        }

        let failed_segments = results.iter().filter(|r| r.outcome.is_failed()).count();
        let text = Reassembler::new(profile.join).join(results.clone());
        self.state = JobState::Done;

        let elapsed = started.elapsed();
        info!(
            "Job finished in {:.1}s: {} segments, {} failed",
            elapsed.as_secs_f64(), total, failed_segments
        );

        Ok(JobReport {
            text,
            results,
            total_segments: total,
            failed_segments,
            elapsed,
            issues,
        })
    }
}
