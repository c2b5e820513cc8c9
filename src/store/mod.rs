//! Storage abstraction consumed by the quiz core and the seed initializer.

use crate::domain::{CategoryId, NewQuestion, Question, QuestionId, ValidationError};
use async_trait::async_trait;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

pub mod memory;

pub use memory::MemoryStore;

/// Read access to the question bank plus the bulk insert used for seeding.
///
/// Implementations must not cache rows between calls: each call observes the
/// latest committed state of the store.
#[async_trait]
pub trait QuestionStore: Send + Sync + fmt::Debug {
    /// List questions matching the filter, ordered by id.
    async fn list_questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>, StoreError>;

    /// Fetch a single question.
    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StoreError>;

    /// Number of questions in the bank.
    async fn count_questions(&self) -> Result<i64, StoreError>;

    /// Insert questions atomically, skipping any whose `image_url` is already
    /// present. Returns the number of rows inserted.
    async fn insert_questions_batch(&self, questions: &[NewQuestion]) -> Result<usize, StoreError>;
}

/// Candidate restriction for question listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    /// Ids the caller has already seen.
    pub exclude: HashSet<QuestionId>,
    pub category_id: Option<CategoryId>,
}

impl QuestionFilter {
    /// Every question in the bank.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn excluding(ids: impl IntoIterator<Item = QuestionId>) -> Self {
        Self {
            exclude: ids.into_iter().collect(),
            category_id: None,
        }
    }

    pub fn in_category(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn matches(&self, question: &Question) -> bool {
        if self.exclude.contains(&question.id) {
            return false;
        }
        match self.category_id {
            Some(category_id) => question.category_id == Some(category_id),
            None => true,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("invalid input: {0}")]
    Invalid(#[from] ValidationError),
    #[error("question {id} has undecodable options: {source}")]
    CorruptOptions {
        id: QuestionId,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode options: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("unique constraint violated: {0}")]
    Duplicate(&'static str),
    #[error("category {0} does not exist")]
    UnknownCategory(CategoryId),
}
