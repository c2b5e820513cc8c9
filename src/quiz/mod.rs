//! Quiz core: random question selection and answer verification.
//!
//! Both components are stateless and read-only; every call goes to the
//! injected `QuestionStore`.

pub mod selector;
pub mod verifier;

pub use selector::{parse_exclude, QuestionSelector};
pub use verifier::{answers_match, AnswerVerdict, AnswerVerifier};

use crate::domain::QuestionId;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    /// The exclusion set (and category, if any) leaves no candidates.
    #[error("no more questions")]
    NoMoreQuestions,
    #[error("question {0} not found")]
    QuestionNotFound(QuestionId),
    #[error(transparent)]
    Store(#[from] StoreError),
}
