//! Core types for Masterclass: question specs, answer normalization,
//! per-render attempt state, and score keeping.
//!
//! Everything here is plain data. Rendering and input handling live in
//! `mc-drill`; this crate only knows what a question is, how answers are
//! compared, and how outcomes are counted.

/// Attempt state for a single rendered question.
pub mod attempt;
/// Set of question ids answered during a session.
pub mod completion;
/// Error types used throughout the crate.
pub mod error;
/// A lesson: an ordered list of question specs.
pub mod lesson;
/// Text normalization applied before every answer comparison.
pub mod normalize;
/// Question specs and answer keys.
pub mod question;
/// Score totals and the tracker that accumulates them.
pub mod score;

/// Re-export attempt types.
pub use attempt::{AttemptState, AttemptStatus, Outcome, RenderId};
/// Re-export the completion set.
pub use completion::CompletionSet;
/// Re-export error types.
pub use error::{McError, McResult};
/// Re-export the lesson model.
pub use lesson::Lesson;
/// Re-export normalization helpers.
pub use normalize::{join_tokens, normalize};
/// Re-export question types.
pub use question::{AnswerKey, Prompt, QuestionId, QuestionKind, QuestionSpec};
/// Re-export score types.
pub use score::{ScoreTotals, ScoreTracker};
