/*!
 * End-to-end tests for the split, translate and join pipeline
 */

use std::time::{Duration, Instant};
use anyhow::Result;
use pdftwai::providers::mock::MockProvider;
use pdftwai::translation::{ChunkUnit, JobState, JoinPolicy, RateGovernor, TranslationJob};
use crate::common::{self, RecordingReporter};

/// Every segment failing still completes the job with one marker per segment
#[tokio::test]
async fn test_job_withFailingBackend_shouldCompleteWithMarkers() -> Result<()> {
    common::init_logger();
    let service = common::mock_service(MockProvider::failing(), 5, ChunkUnit::Words, JoinPolicy::BlankLine);
    let mut reporter = RecordingReporter::default();

    let report = TranslationJob::new(&service)
        .run(&common::numbered_words(12), "de", &mut reporter)
        .await?;

    assert_eq!(report.total_segments, 3);
    assert_eq!(report.failed_segments, 3);
    assert_eq!(report.issues.len(), 3);
    assert_eq!(report.text.matches("[Error: ").count(), 3);
    assert_eq!(reporter.fractions.last().copied(), Some(1.0));
    Ok(())
}

/// Failures in the middle do not stop later segments from being translated
#[tokio::test]
async fn test_job_withIntermittentBackend_shouldKeepGoing() -> Result<()> {
    let provider = MockProvider::intermittent(2);
    let service = common::mock_service(provider.clone(), 2, ChunkUnit::Words, JoinPolicy::Newline);
    let mut reporter = RecordingReporter::default();

    let report = TranslationJob::new(&service)
        .run(&common::numbered_words(8), "fr", &mut reporter)
        .await?;

    assert_eq!(provider.request_count(), 4);
    assert_eq!(report.results.len(), 4);

    let failed: Vec<usize> = report.results.iter()
        .filter(|r| r.outcome.is_failed())
        .map(|r| r.index)
        .collect();
    assert_eq!(failed, vec![1, 3]);

    let lines: Vec<&str> = report.text.lines().collect();
    assert_eq!(lines[0], "[TRANSLATED to fr] w0 w1");
    assert!(lines[1].starts_with("[Error: "));
    assert_eq!(lines[2], "[TRANSLATED to fr] w4 w5");
    Ok(())
}

/// Progress advances once per segment in equal steps and ends at 1.0
#[tokio::test]
async fn test_job_progress_shouldStepOncePerSegment() -> Result<()> {
    let service = common::mock_service(MockProvider::working(), 3, ChunkUnit::Words, JoinPolicy::Newline);
    let mut reporter = RecordingReporter::default();

    TranslationJob::new(&service)
        .run(&common::numbered_words(14), "it", &mut reporter)
        .await?;

    assert_eq!(reporter.total, Some(5));
    assert_eq!(reporter.fractions.len(), 5);
    for (i, fraction) in reporter.fractions.iter().enumerate() {
        assert!((fraction - (i + 1) as f64 / 5.0).abs() < 1e-9);
    }
    assert!(reporter.fractions.windows(2).all(|w| w[0] < w[1]));
    Ok(())
}

/// An empty document produces no requests and an empty translation
#[tokio::test]
async fn test_job_withEmptyText_shouldProduceNothing() -> Result<()> {
    let provider = MockProvider::working();
    let service = common::mock_service(provider.clone(), 100, ChunkUnit::Characters, JoinPolicy::Newline);
    let mut reporter = RecordingReporter::default();

    let job = TranslationJob::new(&service);
    assert_eq!(job.state(), JobState::Idle);
    let report = job.run("", "es", &mut reporter).await?;

    assert_eq!(report.total_segments, 0);
    assert!(report.text.is_empty());
    assert!(reporter.fractions.is_empty());
    assert_eq!(reporter.total, Some(0));
    assert_eq!(provider.request_count(), 0);
    Ok(())
}

/// Long character-limited text is sent in order as consecutive windows
#[tokio::test]
async fn test_job_withLongText_shouldSendOrderedWindows() -> Result<()> {
    let provider = MockProvider::echo();
    let service = common::mock_service(provider.clone(), 4500, ChunkUnit::Characters, JoinPolicy::Newline);
    let text: String = (0..10_000).map(|i| char::from(b'a' + (i % 26) as u8)).collect();

    let report = TranslationJob::new(&service)
        .run(&text, "es", &mut RecordingReporter::default())
        .await?;

    let sent: Vec<String> = provider.requests().into_iter().map(|r| r.text).collect();
    assert_eq!(sent.len(), 3);
    assert_eq!(sent.concat(), text);
    assert_eq!(report.text, sent.join("\n"));
    Ok(())
}

/// Word-limited segments are separated by blank lines in the output
#[tokio::test]
async fn test_job_withBlankLineJoin_shouldSeparateParagraphs() -> Result<()> {
    let service = common::mock_service(MockProvider::echo(), 2, ChunkUnit::Words, JoinPolicy::BlankLine);

    let report = TranslationJob::new(&service)
        .run("Hello world.\nSee you soon.", "fr", &mut RecordingReporter::default())
        .await?;

    assert_eq!(report.text, "Hello world.\n\nSee you\n\nsoon.");
    assert!(!report.has_failures());
    Ok(())
}

/// The governor spaces out backend calls but not after the last one
#[tokio::test]
async fn test_job_withGovernor_shouldWaitBetweenSegments() -> Result<()> {
    let delay = Duration::from_millis(40);
    let service = common::mock_service(MockProvider::slow(5), 1, ChunkUnit::Words, JoinPolicy::Newline);

    let started = Instant::now();
    let report = TranslationJob::new(&service)
        .with_governor(RateGovernor::new(delay))
        .run("one two three four", "de", &mut RecordingReporter::default())
        .await?;
    let elapsed = started.elapsed();

    assert_eq!(report.total_segments, 4);
    assert!(elapsed >= delay * 3, "elapsed {:?}", elapsed);
    Ok(())
}

/// Issues name the failed segment and its position
#[tokio::test]
async fn test_job_issues_shouldNameFailedSegment() -> Result<()> {
    let service = common::mock_service(MockProvider::intermittent(3), 1, ChunkUnit::Words, JoinPolicy::Newline);

    let report = TranslationJob::new(&service)
        .run("a b c", "fr", &mut RecordingReporter::default())
        .await?;

    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].level, "error");
    assert!(report.issues[0].message.starts_with("Segment 3/3 failed"));
    Ok(())
}

/// Empty replies count as failed segments and leave a marker in place
#[tokio::test]
async fn test_job_withEmptyReplies_shouldMarkEverySegment() -> Result<()> {
    let service = common::mock_service(MockProvider::empty(), 2, ChunkUnit::Words, JoinPolicy::Newline);

    let report = TranslationJob::new(&service)
        .run("one two three", "fr", &mut RecordingReporter::default())
        .await?;

    assert_eq!(report.total_segments, 2);
    assert_eq!(report.failed_segments, 2);
    assert_eq!(report.issues.len(), 2);
    assert!(report.text.lines().all(|line| line.starts_with("[Error: ")));
    Ok(())
}

/// Results are joined in segment order whatever the backend returns
#[tokio::test]
async fn test_job_withCustomReplies_shouldKeepSegmentOrder() -> Result<()> {
    let provider = MockProvider::working().with_custom_response(|request| request.text.to_uppercase());
    let service = common::mock_service(provider, 1, ChunkUnit::Words, JoinPolicy::BlankLine);

    let report = TranslationJob::new(&service)
        .run("alpha beta gamma", "de", &mut RecordingReporter::default())
        .await?;

    assert_eq!(report.text, "ALPHA\n\nBETA\n\nGAMMA");
    Ok(())
}
