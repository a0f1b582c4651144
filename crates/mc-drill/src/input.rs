//! Learner input forwarded from the host to a drill.

use crate::surface::ControlRole;

/// One learner action on a rendered drill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrillInput {
    /// Pick the multiple-choice option at this display position. Grades.
    Choose(usize),
    /// Replace the contents of the text field. Does not grade.
    Type(String),
    /// Press "check". Grades fill-in and word-order drills.
    Submit,
    /// Tap a bank token: append it to the built sentence.
    TapToken(usize),
    /// Drop a bank token at a position in the built sentence.
    DropToken {
        /// Bank slot of the dragged token.
        slot: usize,
        /// Insertion position, clamped to the sentence length.
        position: usize,
    },
    /// Take the token at this position out of the built sentence.
    RemoveToken(usize),
    /// Empty the built sentence.
    ClearTokens,
}

impl DrillInput {
    /// The input produced by activating a control, for hosts that only
    /// report clicks.
    ///
    /// Returns `None` for the text field and the study aids (hint, reveal,
    /// speak), which hosts handle through [`Drill`](crate::Drill) methods.
    pub fn from_role(role: ControlRole) -> Option<Self> {
        match role {
            ControlRole::Choice(position) => Some(Self::Choose(position)),
            ControlRole::Submit => Some(Self::Submit),
            ControlRole::BankToken(slot) => Some(Self::TapToken(slot)),
            ControlRole::TextEntry | ControlRole::Hint | ControlRole::Reveal | ControlRole::Speak => {
                None
            }
        }
    }

    /// Whether this input can produce a grade.
    pub fn may_grade(&self) -> bool {
        matches!(
            self,
            Self::Choose(_) | Self::Submit | Self::TapToken(_) | Self::DropToken { .. }
        )
    }
}
