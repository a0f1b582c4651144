//! The sentence a learner builds in a word-order drill.
//!
//! Tapping a token and dragging it onto the sentence are the same operation
//! with a different insertion point, so both go through
//! [`WordBuilder::place`].

/// Bank of shuffled tokens plus the sentence built from them.
///
/// Tokens are tracked by bank slot, not by text, so repeated words ("the
/// ... the") stay distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordBuilder {
    bank: Vec<String>,
    placed: Vec<usize>,
}

impl WordBuilder {
    /// Builder over the given bank, with an empty sentence.
    pub fn new(bank: Vec<String>) -> Self {
        Self {
            bank,
            placed: Vec::new(),
        }
    }

    /// Tokens in bank order.
    pub fn bank(&self) -> &[String] {
        &self.bank
    }

    /// Number of placed tokens.
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    /// Whether nothing has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Whether every bank token has been placed.
    pub fn is_complete(&self) -> bool {
        !self.bank.is_empty() && self.placed.len() == self.bank.len()
    }

    /// Whether the token in `slot` is already in the sentence.
    pub fn is_placed(&self, slot: usize) -> bool {
        self.placed.contains(&slot)
    }

    /// Insert the token from `slot` at `position` (clamped to the sentence
    /// length). Returns `false` if the slot does not exist or is already
    /// placed.
    pub fn place(&mut self, slot: usize, position: usize) -> bool {
        if slot >= self.bank.len() || self.is_placed(slot) {
            return false;
        }
        let position = position.min(self.placed.len());
        self.placed.insert(position, slot);
        true
    }

    /// Take the token at `position` out of the sentence, returning its slot.
    pub fn remove(&mut self, position: usize) -> Option<usize> {
        (position < self.placed.len()).then(|| self.placed.remove(position))
    }

    /// Take the last placed token out of the sentence.
    pub fn undo(&mut self) -> Option<usize> {
        self.placed.pop()
    }

    /// Empty the sentence, returning the freed slots.
    pub fn clear(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.placed)
    }

    /// Slots in sentence order.
    pub fn placed_slots(&self) -> &[usize] {
        &self.placed
    }

    /// Token texts in sentence order.
    pub fn built(&self) -> Vec<String> {
        self.placed
            .iter()
            .filter_map(|&slot| self.bank.get(slot).cloned())
            .collect()
    }
}
