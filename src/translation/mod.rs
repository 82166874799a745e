/*!
 * Chunked translation pipeline.
 *
 * This module turns a document's text into a translated text. It is split
 * into several submodules:
 *
 * - `chunker`: Splitting text into bounded segments
 * - `profile`: Per-provider segment size, delay and join policy
 * - `core`: Translation service wrapping the selected provider
 * - `governor`: Fixed delay between provider calls
 * - `orchestrator`: The sequential per-segment job loop
 * - `reassembler`: Joining results and cutting paragraphs
 */

// Re-export main types for easier usage
pub use self::chunker::{ChunkPolicy, ChunkUnit, Segment};
pub use self::core::{LogEntry, SegmentOutcome, SegmentResult, TranslationService};
pub use self::governor::RateGovernor;
pub use self::orchestrator::{
    FnReporter, JobProgress, JobReport, JobState, NoProgress, ProgressReporter, TranslationJob,
};
pub use self::profile::ProviderProfile;
pub use self::reassembler::{JoinPolicy, Reassembler};

// Submodules
pub mod chunker;
pub mod core;
pub mod governor;
pub mod orchestrator;
pub mod profile;
pub mod reassembler;
