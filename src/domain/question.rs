//! Question entity, its client-facing prompt view, and the write payload.

use crate::domain::{AnswerOptions, CategoryId, QuestionId, ValidationError};
use serde::{de, Deserialize, Deserializer, Serialize};

/// A stored quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    /// Absolute or root-relative URI of the poster image.
    pub image_url: String,
    /// Equal to exactly one element of `options`.
    pub correct_answer: String,
    pub options: AnswerOptions,
    pub category_id: Option<CategoryId>,
}

impl Question {
    /// The fields a client needs to render the question. Never carries the
    /// correct answer or the category.
    pub fn prompt(&self) -> QuestionPrompt {
        QuestionPrompt {
            id: self.id,
            image_url: self.image_url.clone(),
            options: self.options.as_slice().to_vec(),
        }
    }
}

/// Public view of a question served to players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionPrompt {
    pub id: QuestionId,
    pub image_url: String,
    pub options: Vec<String>,
}

/// Payload for creating or replacing a question.
///
/// `options` also accepts the admin form's `options_json` field, either as
/// a list or as a JSON-encoded string of one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub image_url: String,
    pub correct_answer: String,
    #[serde(alias = "options_json", deserialize_with = "deserialize_options")]
    pub options: Vec<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OptionsInput {
    List(Vec<String>),
    Encoded(String),
}

fn deserialize_options<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match OptionsInput::deserialize(deserializer)? {
        OptionsInput::List(options) => Ok(options),
        OptionsInput::Encoded(raw) => serde_json::from_str(&raw).map_err(de::Error::custom),
    }
}

impl NewQuestion {
    pub fn new(
        image_url: impl Into<String>,
        correct_answer: impl Into<String>,
        options: Vec<String>,
        category_id: Option<CategoryId>,
    ) -> Self {
        Self {
            image_url: image_url.into(),
            correct_answer: correct_answer.into(),
            options,
            category_id,
        }
    }

    /// Trim every text field, then check the question invariants.
    ///
    /// Stored answers and options are always trimmed, so membership of the
    /// correct answer is checked exactly.
    pub fn into_validated(self) -> Result<Self, ValidationError> {
        let question = NewQuestion {
            image_url: self.image_url.trim().to_string(),
            correct_answer: self.correct_answer.trim().to_string(),
            options: self.options.iter().map(|o| o.trim().to_string()).collect(),
            category_id: self.category_id,
        };
        question.validate()?;
        Ok(question)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.image_url.trim().is_empty() {
            return Err(ValidationError::EmptyImageUrl);
        }

        let options = AnswerOptions::new(self.options.clone());
        options.validate()?;
        if !options.contains(&self.correct_answer) {
            return Err(ValidationError::CorrectAnswerNotInOptions(
                self.correct_answer.clone(),
            ));
        }
        Ok(())
    }

    pub fn answer_options(&self) -> AnswerOptions {
        AnswerOptions::new(self.options.clone())
    }
}
