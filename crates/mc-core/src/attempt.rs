use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one rendering of a question.
///
/// Rendering the same spec twice yields two distinct ids, so two instances
/// of one question never share attempt state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderId(Uuid);

impl RenderId {
    /// Generate a fresh render id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RenderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Result of a graded attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The answer matched.
    Correct,
    /// The answer did not match.
    Incorrect,
}

impl Outcome {
    /// Build an outcome from a comparison result.
    pub fn from_match(matched: bool) -> Self {
        if matched { Self::Correct } else { Self::Incorrect }
    }

    /// Whether this is [`Outcome::Correct`].
    pub fn is_correct(self) -> bool {
        self == Self::Correct
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Correct => write!(f, "correct"),
            Self::Incorrect => write!(f, "incorrect"),
        }
    }
}

/// Where a rendered question is in its single-attempt lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttemptStatus {
    /// No graded input yet.
    #[default]
    Unanswered,
    /// Graded once; no further input is accepted.
    Answered(Outcome),
}

/// Mutable grading state of one rendered question.
///
/// Moves from `Unanswered` to `Answered` exactly once. The instance is
/// locked exactly when it has been answered.
#[derive(Debug, Clone)]
pub struct AttemptState {
    render_id: RenderId,
    status: AttemptStatus,
}

impl AttemptState {
    /// Fresh, unlocked state for a new rendering.
    pub fn new() -> Self {
        Self {
            render_id: RenderId::new(),
            status: AttemptStatus::Unanswered,
        }
    }

    /// Id of the rendering this state belongs to.
    pub fn render_id(&self) -> RenderId {
        self.render_id
    }

    /// Current status.
    pub fn status(&self) -> AttemptStatus {
        self.status
    }

    /// Whether further input must be ignored.
    pub fn is_locked(&self) -> bool {
        matches!(self.status, AttemptStatus::Answered(_))
    }

    /// The graded outcome, if any.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            AttemptStatus::Unanswered => None,
            AttemptStatus::Answered(outcome) => Some(outcome),
        }
    }

    /// Record the outcome and lock.
    ///
    /// Returns `true` on the transition out of `Unanswered`, `false` if the
    /// state was already locked (the stored outcome is left untouched).
    pub fn lock(&mut self, outcome: Outcome) -> bool {
        if self.is_locked() {
            return false;
        }
        self.status = AttemptStatus::Answered(outcome);
        true
    }
}

impl Default for AttemptState {
    fn default() -> Self {
        Self::new()
    }
}
