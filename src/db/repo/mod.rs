//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for all database operations.
//! Methods are organized across submodules by table:
//! - `categories.rs` - Category CRUD
//! - `questions.rs` - Question CRUD and the `QuestionStore` implementation

mod categories;
mod questions;

use crate::domain::{AnswerOptions, CategoryId, Question, QuestionId};
use crate::store::StoreError;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

/// Repository for database operations.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    /// Round-trip to the database; used by the readiness probe.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn question_from_row(row: &SqliteRow) -> Result<Question, StoreError> {
    let id = QuestionId::new(row.get("id"));
    let options_json: String = row.get("options_json");
    let options = AnswerOptions::decode(&options_json)
        .map_err(|source| StoreError::CorruptOptions { id, source })?;

    Ok(Question {
        id,
        image_url: row.get("image_url"),
        correct_answer: row.get("correct_answer"),
        options,
        category_id: row.get::<Option<i64>, _>("category_id").map(CategoryId::new),
    })
}

/// Translate constraint violations on writes into domain-level store errors.
fn classify_write_error(
    err: sqlx::Error,
    duplicate: &'static str,
    category_id: Option<CategoryId>,
) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::Duplicate(duplicate);
        }
        if db_err.is_foreign_key_violation() {
            if let Some(category_id) = category_id {
                return StoreError::UnknownCategory(category_id);
            }
        }
    }
    StoreError::Database(err)
}
