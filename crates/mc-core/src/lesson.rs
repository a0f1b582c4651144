//! Lesson content: a titled, ordered list of question specs.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{McError, McResult};
use crate::question::{QuestionId, QuestionSpec};

/// Minimum Jaro-Winkler similarity for an id suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// One lesson's worth of questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    /// Lesson title.
    pub title: String,
    /// Optional short description shown before the first question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Questions in presentation order.
    pub questions: Vec<QuestionSpec>,
}

impl Lesson {
    /// Create an empty lesson.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            questions: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a question.
    pub fn with_question(mut self, question: QuestionSpec) -> Self {
        self.questions.push(question);
        self
    }

    /// Parse a lesson from JSON.
    pub fn from_json(json: &str) -> McResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a lesson file.
    pub fn load(path: &Path) -> McResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> McResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate every question and check that ids are unique.
    ///
    /// Returns every problem found, not just the first.
    pub fn validate(&self) -> Result<(), Vec<McError>> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();
        for question in &self.questions {
            if let Err(e) = question.validate() {
                errors.push(e);
            }
            if !seen.insert(question.id()) {
                errors.push(McError::DuplicateId(question.id().clone()));
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the lesson has no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Look up a question by id.
    pub fn get(&self, id: &str) -> Option<&QuestionSpec> {
        self.questions.iter().find(|q| q.id().as_str() == id)
    }

    /// Look up a question by id, failing with [`McError::UnknownQuestion`].
    pub fn require(&self, id: &str) -> McResult<&QuestionSpec> {
        self.get(id)
            .ok_or_else(|| McError::UnknownQuestion(id.to_string()))
    }

    /// Closest existing id to a mistyped one, for "did you mean" messages.
    pub fn suggest(&self, id: &str) -> Option<&QuestionId> {
        let wanted = id.to_lowercase();
        self.questions
            .iter()
            .map(|q| {
                let score = strsim::jaro_winkler(&wanted, &q.id().as_str().to_lowercase());
                (q.id(), score)
            })
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Set of all question ids.
    pub fn question_ids(&self) -> HashSet<QuestionId> {
        self.questions.iter().map(|q| q.id().clone()).collect()
    }

    /// File-name and storage-key friendly form of the title.
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.title.len());
        for c in self.title.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        let trimmed = slug.trim_end_matches('-');
        if trimmed.is_empty() {
            "lesson".to_string()
        } else {
            trimmed.to_string()
        }
    }
}
