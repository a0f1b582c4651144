//! The host surface a drill renders into.
//!
//! A [`Surface`] is the container a lesson page hands to the engine: the
//! engine clears it, shows the prompt, adds [`Control`]s, and later marks,
//! disables and annotates them. The surface never grades anything; it only
//! displays what it is told and reports learner actions back as
//! [`DrillInput`](crate::DrillInput) values.

use std::fmt;

use mc_core::{Outcome, Prompt, QuestionKind};
use mc_host::{HelpLanguage, Notice};

/// Identifies a control within one rendered drill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(u32);

impl ControlId {
    /// Wrap a raw id.
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw id.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a control does when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlRole {
    /// A multiple-choice option at this display position.
    Choice(usize),
    /// The free-text answer field.
    TextEntry,
    /// The "check" button.
    Submit,
    /// A word-order token in the bank, by slot.
    BankToken(usize),
    /// Show the hint.
    Hint,
    /// Show the answer.
    Reveal,
    /// Read the prompt aloud.
    Speak,
}

/// One interactive element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    /// Id, unique within the drill.
    pub id: ControlId,
    /// Behaviour.
    pub role: ControlRole,
    /// Visible text.
    pub label: String,
}

impl Control {
    /// Create a control.
    pub fn new(id: ControlId, role: ControlRole, label: impl Into<String>) -> Self {
        Self {
            id,
            role,
            label: label.into(),
        }
    }
}

/// Visual correctness marker on a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    /// Shown as right.
    Correct,
    /// Shown as wrong.
    Incorrect,
}

impl From<Outcome> for Mark {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Correct => Self::Correct,
            Outcome::Incorrect => Self::Incorrect,
        }
    }
}

/// The feedback block shown once a drill is graded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    /// Grade.
    pub outcome: Outcome,
    /// Short verdict in the learner's help language.
    pub message: String,
    /// The expected answer, present when the attempt was wrong.
    pub answer: Option<String>,
    /// The question's explanation, if any.
    pub explanation: Option<String>,
}

/// A container the engine renders one drill into.
pub trait Surface {
    /// Remove everything from the container.
    fn clear(&mut self);

    /// Display the question prompt.
    fn show_prompt(&mut self, prompt: &Prompt, kind: QuestionKind);

    /// Append a control. New controls are interactive and unmarked.
    fn add_control(&mut self, control: Control);

    /// Enable or disable a control.
    fn set_interactive(&mut self, id: ControlId, interactive: bool);

    /// Mark a control as right or wrong.
    fn mark(&mut self, id: ControlId, mark: Mark);

    /// Redisplay the sentence built so far in a word-order drill.
    fn update_built(&mut self, tokens: &[String]);

    /// Display the graded feedback.
    fn show_feedback(&mut self, feedback: &Feedback);

    /// Display a one-line notice (hint, revealed answer, capability failure).
    fn show_notice(&mut self, notice: &Notice);
}

/// Verdict line for an outcome.
pub fn feedback_message(language: HelpLanguage, outcome: Outcome) -> &'static str {
    match (language, outcome) {
        (HelpLanguage::French, Outcome::Correct) => "Bravo, c'est correct !",
        (HelpLanguage::French, Outcome::Incorrect) => "Pas tout à fait.",
        (HelpLanguage::English, Outcome::Correct) => "Correct!",
        (HelpLanguage::English, Outcome::Incorrect) => "Not quite.",
    }
}

/// Notice shown when the learner submits nothing.
pub fn empty_answer_notice(language: HelpLanguage, kind: QuestionKind) -> Notice {
    let text = match (language, kind) {
        (HelpLanguage::French, QuestionKind::WordOrder) => "Construis d'abord la phrase.",
        (HelpLanguage::French, _) => "Écris d'abord une réponse.",
        (HelpLanguage::English, QuestionKind::WordOrder) => "Build the sentence first.",
        (HelpLanguage::English, _) => "Type an answer first.",
    };
    Notice::info(text)
}

/// Notice shown when the learner asks for a hint with hints turned off.
pub fn hints_off_notice(language: HelpLanguage) -> Notice {
    match language {
        HelpLanguage::French => Notice::info("Les indices sont désactivés."),
        HelpLanguage::English => Notice::info("Hints are turned off."),
    }
}
