//! Error types for drills and lesson sessions.

use mc_core::{McError, QuestionId};
use mc_host::HostError;
use thiserror::Error;

/// Result type for drill and session operations.
pub type DrillResult<T> = Result<T, DrillError>;

/// Errors that can occur while running a lesson.
///
/// Grading itself never fails; these come from content lookup, persistence,
/// and the lesson-level retry policy.
#[derive(Debug, Error)]
pub enum DrillError {
    /// Lesson content error.
    #[error("{0}")]
    Core(#[from] McError),

    /// Capability error, typically from the progress store.
    #[error("{0}")]
    Host(#[from] HostError),

    /// Progress snapshot could not be encoded or decoded.
    #[error("progress snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// The question was already answered and the retry policy forbids a new
    /// instance.
    #[error("question \"{0}\" was already answered")]
    AlreadyAnswered(QuestionId),
}
