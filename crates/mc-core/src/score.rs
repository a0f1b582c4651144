//! Score keeping across every drill on a page.
//!
//! One [`ScoreTracker`] lives for the whole lesson session and is handed to
//! each drill when it grades. The tracker does not deduplicate: the drill's
//! lock guarantees it is called once per rendered question.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attempt::Outcome;

/// Counts of graded attempts and correct answers.
///
/// `correct <= attempts` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTotals")]
pub struct ScoreTotals {
    correct: u32,
    attempts: u32,
}

/// Unchecked totals as read from disk.
#[derive(Deserialize)]
struct RawTotals {
    correct: u32,
    attempts: u32,
}

impl From<RawTotals> for ScoreTotals {
    fn from(raw: RawTotals) -> Self {
        Self::new(raw.correct, raw.attempts)
    }
}

impl ScoreTotals {
    /// Build totals, clamping `correct` to `attempts`.
    pub fn new(correct: u32, attempts: u32) -> Self {
        Self {
            correct: correct.min(attempts),
            attempts,
        }
    }

    /// Number of correct answers.
    pub fn correct(&self) -> u32 {
        self.correct
    }

    /// Number of graded attempts.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Number of incorrect answers.
    pub fn incorrect(&self) -> u32 {
        self.attempts.saturating_sub(self.correct)
    }

    /// Fraction of correct answers, 0.0 when nothing was attempted.
    pub fn accuracy(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.attempts)
        }
    }
}

impl fmt::Display for ScoreTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = (self.accuracy() * 100.0).round() as u32;
        write!(f, "{}/{} correct ({pct}%)", self.correct, self.attempts)
    }
}

/// Accumulates [`ScoreTotals`] for a lesson session.
#[derive(Debug, Clone, Default)]
pub struct ScoreTracker {
    totals: ScoreTotals,
}

impl ScoreTracker {
    /// Tracker starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one graded attempt.
    pub fn record(&mut self, outcome: Outcome) {
        self.totals.attempts = self.totals.attempts.saturating_add(1);
        if outcome.is_correct() {
            self.totals.correct = self.totals.correct.saturating_add(1);
        }
    }

    /// Current totals, by value.
    pub fn snapshot(&self) -> ScoreTotals {
        self.totals
    }

    /// Zero the totals.
    pub fn reset(&mut self) {
        self.totals = ScoreTotals::default();
    }

    /// Replace the totals with a previously saved snapshot.
    pub fn restore(&mut self, totals: ScoreTotals) {
        self.totals = ScoreTotals::new(totals.correct, totals.attempts);
    }
}
