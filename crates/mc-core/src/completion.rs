//! Tracking which questions have been answered.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::question::QuestionId;

/// Ids of the questions answered at least once this session.
///
/// Drives progress-bar displays and is persisted with the score snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionSet {
    ids: BTreeSet<QuestionId>,
}

impl CompletionSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a question as answered. Returns `true` if it was not yet marked.
    pub fn insert(&mut self, id: QuestionId) -> bool {
        self.ids.insert(id)
    }

    /// Whether a question has been answered.
    pub fn contains(&self, id: &QuestionId) -> bool {
        self.ids.contains(id)
    }

    /// Number of answered questions.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing has been answered yet.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Answered ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &QuestionId> {
        self.ids.iter()
    }

    /// Share of `total` questions answered, clamped to `0.0..=1.0`.
    pub fn progress(&self, total: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        (self.ids.len() as f64 / total as f64).min(1.0)
    }

    /// Drop ids that are not part of the lesson any more.
    pub fn retain_known(&mut self, known: &HashSet<QuestionId>) {
        self.ids.retain(|id| known.contains(id));
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
