use crate::domain::QuestionId;
use crate::quiz::QuizError;
use crate::store::QuestionStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Result of checking a submitted answer. `correct_answer` is always
/// populated so the client can reveal it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerVerdict {
    pub correct: bool,
    pub correct_answer: String,
}

/// Checks submitted answers against the stored correct answer.
#[derive(Debug, Clone)]
pub struct AnswerVerifier {
    store: Arc<dyn QuestionStore>,
}

impl AnswerVerifier {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    /// # Errors
    /// `QuizError::QuestionNotFound` if `question_id` does not exist.
    pub async fn check_answer(
        &self,
        question_id: QuestionId,
        answer: &str,
    ) -> Result<AnswerVerdict, QuizError> {
        let question = self
            .store
            .get_question(question_id)
            .await?
            .ok_or(QuizError::QuestionNotFound(question_id))?;

        let correct = answers_match(answer, &question.correct_answer);
        tracing::debug!(question_id = %question_id, correct, "Checked answer");

        Ok(AnswerVerdict {
            correct,
            correct_answer: question.correct_answer,
        })
    }
}

/// Trim both sides, then compare exactly. No case folding or Unicode
/// normalization.
pub fn answers_match(submitted: &str, expected: &str) -> bool {
    submitted.trim() == expected.trim()
}
