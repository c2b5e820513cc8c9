//! Domain types for the quiz question bank.
//!
//! This module provides:
//! - ID newtypes: QuestionId, CategoryId
//! - AnswerOptions with its persisted JSON encoding
//! - Question and Category entities plus their validated write payloads

pub mod category;
pub mod options;
pub mod primitives;
pub mod question;
pub mod validation;

pub use category::{Category, NewCategory};
pub use options::AnswerOptions;
pub use primitives::{CategoryId, QuestionId};
pub use question::{NewQuestion, Question, QuestionPrompt};
pub use validation::ValidationError;
