//! Write-side validation failures.

use thiserror::Error;

/// Rejection of malformed input.
///
/// `reason()` is the machine-readable code returned to clients; `Display`
/// carries the human-readable message that goes to the logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("exclude list entry {0:?} is not an integer id")]
    InvalidExclude(String),
    #[error("image_url must not be empty")]
    EmptyImageUrl,
    #[error("a question needs at least 2 options, got {0}")]
    TooFewOptions(usize),
    #[error("options must not contain empty strings")]
    EmptyOption,
    #[error("option {0:?} appears more than once")]
    DuplicateOption(String),
    #[error("correct answer {0:?} is not one of the options")]
    CorrectAnswerNotInOptions(String),
    #[error("category name must not be empty")]
    EmptyCategoryName,
}

impl ValidationError {
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::InvalidExclude(_) => "invalid-exclude",
            ValidationError::EmptyImageUrl => "empty-image-url",
            ValidationError::TooFewOptions(_) => "too-few-options",
            ValidationError::EmptyOption => "empty-option",
            ValidationError::DuplicateOption(_) => "duplicate-option",
            ValidationError::CorrectAnswerNotInOptions(_) => "correct-answer-not-in-options",
            ValidationError::EmptyCategoryName => "empty-category-name",
        }
    }
}
