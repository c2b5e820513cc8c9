//! In-memory question store for tests without a database.

use super::{QuestionFilter, QuestionStore, StoreError};
use crate::domain::{NewQuestion, Question, QuestionId};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Question store backed by a vector; ids are assigned sequentially from 1.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    questions: Vec<Question>,
    next_id: i64,
}

impl MemoryState {
    fn insert(&mut self, new: &NewQuestion) -> bool {
        if self.questions.iter().any(|q| q.image_url == new.image_url) {
            return false;
        }
        self.next_id += 1;
        self.questions.push(Question {
            id: QuestionId::new(self.next_id),
            image_url: new.image_url.clone(),
            correct_answer: new.correct_answer.clone(),
            options: new.answer_options(),
            category_id: new.category_id,
        });
        true
    }
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a question to the store.
    pub fn with_question(self, question: NewQuestion) -> Self {
        self.state().insert(&question);
        self
    }

    /// Add multiple questions to the store.
    pub fn with_questions(self, questions: Vec<NewQuestion>) -> Self {
        {
            let mut state = self.state();
            for question in &questions {
                state.insert(question);
            }
        }
        self
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn list_questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>, StoreError> {
        Ok(self
            .state()
            .questions
            .iter()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect())
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StoreError> {
        Ok(self.state().questions.iter().find(|q| q.id == id).cloned())
    }

    async fn count_questions(&self) -> Result<i64, StoreError> {
        Ok(self.state().questions.len() as i64)
    }

    async fn insert_questions_batch(&self, questions: &[NewQuestion]) -> Result<usize, StoreError> {
        let validated = questions
            .iter()
            .cloned()
            .map(NewQuestion::into_validated)
            .collect::<Result<Vec<_>, _>>()?;

        let mut state = self.state();
        Ok(validated.iter().filter(|q| state.insert(q)).count())
    }
}
