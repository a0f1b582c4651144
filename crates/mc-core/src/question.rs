use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{McError, McResult};
use crate::normalize::normalize;

/// Opaque identifier of a question, unique within a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Create an id from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for QuestionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The three interaction styles a question can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Pick one option out of several.
    MultipleChoice,
    /// Type a short free-text answer.
    FillInText,
    /// Arrange word tokens into a sentence.
    WordOrder,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultipleChoice => write!(f, "multiple_choice"),
            Self::FillInText => write!(f, "fill_in_text"),
            Self::WordOrder => write!(f, "word_order"),
        }
    }
}

/// Text shown to the learner, with an optional variant for speech.
///
/// In lesson JSON a prompt is either a bare string or an object
/// `{"text": ..., "spoken": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PromptRepr", into = "PromptRepr")]
pub struct Prompt {
    text: String,
    spoken: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PromptRepr {
    Plain(String),
    Full {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        spoken: Option<String>,
    },
}

impl From<PromptRepr> for Prompt {
    fn from(repr: PromptRepr) -> Self {
        match repr {
            PromptRepr::Plain(text) => Self { text, spoken: None },
            PromptRepr::Full { text, spoken } => Self { text, spoken },
        }
    }
}

impl From<Prompt> for PromptRepr {
    fn from(prompt: Prompt) -> Self {
        match prompt.spoken {
            None => Self::Plain(prompt.text),
            spoken => Self::Full {
                text: prompt.text,
                spoken,
            },
        }
    }
}

impl Prompt {
    /// Create a prompt with display text only.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spoken: None,
        }
    }

    /// Set the text to pronounce instead of the display text.
    pub fn with_spoken(mut self, spoken: impl Into<String>) -> Self {
        self.spoken = Some(spoken.into());
        self
    }

    /// Display text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Explicit spoken variant, if any.
    pub fn spoken(&self) -> Option<&str> {
        self.spoken.as_deref()
    }

    /// Text handed to the speech provider: the spoken variant or the display text.
    pub fn speech_text(&self) -> &str {
        self.spoken.as_deref().unwrap_or(&self.text)
    }
}

impl From<&str> for Prompt {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Prompt {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// The kind-specific part of a question: what counts as correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerKey {
    /// Options in authored order and the index of the right one.
    MultipleChoice {
        /// Option labels, in authored order.
        choices: Vec<String>,
        /// Index into `choices` of the correct option.
        correct_index: usize,
    },
    /// Every accepted spelling of a free-text answer.
    FillInText {
        /// Accepted answers; the first one is the canonical form.
        accepted: Vec<String>,
    },
    /// Tokens in the order that forms the correct sentence.
    WordOrder {
        /// Target token sequence.
        target: Vec<String>,
    },
}

impl AnswerKey {
    /// The question kind this key belongs to.
    pub fn kind(&self) -> QuestionKind {
        match self {
            Self::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            Self::FillInText { .. } => QuestionKind::FillInText,
            Self::WordOrder { .. } => QuestionKind::WordOrder,
        }
    }
}

/// Immutable description of one drill item.
///
/// Fields are only reachable through accessors; the `with_*` methods consume
/// the spec and are meant for construction, not for editing a live question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSpec {
    id: QuestionId,
    prompt: Prompt,
    #[serde(flatten)]
    answer: AnswerKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    explanation: Option<String>,
}

impl QuestionSpec {
    /// Create a spec from its parts.
    pub fn new(id: impl Into<QuestionId>, prompt: impl Into<Prompt>, answer: AnswerKey) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            answer,
            hint: None,
            explanation: None,
        }
    }

    /// Create a multiple-choice question.
    pub fn multiple_choice<I, S>(
        id: impl Into<QuestionId>,
        prompt: impl Into<Prompt>,
        choices: I,
        correct_index: usize,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let choices = choices.into_iter().map(Into::into).collect();
        Self::new(
            id,
            prompt,
            AnswerKey::MultipleChoice {
                choices,
                correct_index,
            },
        )
    }

    /// Create a fill-in-the-blank question.
    pub fn fill_in_text<I, S>(id: impl Into<QuestionId>, prompt: impl Into<Prompt>, accepted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let accepted = accepted.into_iter().map(Into::into).collect();
        Self::new(id, prompt, AnswerKey::FillInText { accepted })
    }

    /// Create a sentence-builder question.
    pub fn word_order<I, S>(id: impl Into<QuestionId>, prompt: impl Into<Prompt>, target: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let target = target.into_iter().map(Into::into).collect();
        Self::new(id, prompt, AnswerKey::WordOrder { target })
    }

    /// Attach a hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Attach an explanation shown after the attempt.
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Unique id within the lesson.
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    /// The prompt.
    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    /// The answer key.
    pub fn answer(&self) -> &AnswerKey {
        &self.answer
    }

    /// Interaction kind, derived from the answer key.
    pub fn kind(&self) -> QuestionKind {
        self.answer.kind()
    }

    /// Optional hint.
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Optional explanation.
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    /// Check the spec for content errors.
    ///
    /// The drill engine never depends on this: a malformed spec simply grades
    /// as incorrect. It exists so lesson authors hear about mistakes early.
    pub fn validate(&self) -> McResult<()> {
        if self.id.as_str().trim().is_empty() {
            return Err(self.invalid("empty id"));
        }
        if self.prompt.text().trim().is_empty() {
            return Err(self.invalid("empty prompt"));
        }
        match &self.answer {
            AnswerKey::MultipleChoice {
                choices,
                correct_index,
            } => {
                if choices.is_empty() {
                    return Err(self.invalid("no choices"));
                }
                if *correct_index >= choices.len() {
                    return Err(self.invalid(&format!(
                        "correct_index {correct_index} out of range for {} choices",
                        choices.len()
                    )));
                }
            }
            AnswerKey::FillInText { accepted } => {
                if accepted.is_empty() {
                    return Err(self.invalid("no accepted answers"));
                }
                if let Some(blank) = accepted.iter().find(|a| normalize(a).is_empty()) {
                    return Err(self.invalid(&format!("accepted answer {blank:?} is blank")));
                }
            }
            AnswerKey::WordOrder { target } => {
                if target.is_empty() {
                    return Err(self.invalid("empty target sequence"));
                }
                if target.iter().any(|t| t.trim().is_empty()) {
                    return Err(self.invalid("blank token in target sequence"));
                }
            }
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> McError {
        McError::InvalidQuestion {
            id: self.id.clone(),
            reason: reason.to_string(),
        }
    }
}
