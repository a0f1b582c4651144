use crate::question::QuestionId;

/// Alias for `Result<T, McError>`.
pub type McResult<T> = Result<T, McError>;

/// Errors raised while loading or validating lesson content.
#[derive(Debug, thiserror::Error)]
pub enum McError {
    /// A question spec is malformed.
    #[error("invalid question \"{id}\": {reason}")]
    InvalidQuestion {
        /// Id of the offending question (may be empty).
        id: QuestionId,
        /// What is wrong with it.
        reason: String,
    },

    /// Two questions in the same lesson share an id.
    #[error("duplicate question id: \"{0}\"")]
    DuplicateId(QuestionId),

    /// The requested question id does not exist in the lesson.
    #[error("question not found: \"{0}\"")]
    UnknownQuestion(String),

    /// Lesson JSON could not be parsed.
    #[error("failed to parse lesson: {0}")]
    Parse(#[from] serde_json::Error),

    /// Lesson file could not be read.
    #[error("failed to read lesson: {0}")]
    Io(#[from] std::io::Error),
}
