//! Question operations for the repository.

use crate::domain::{NewQuestion, Question, QuestionId};
use crate::store::{QuestionFilter, QuestionStore, StoreError};
use async_trait::async_trait;
use sqlx::sqlite::SqliteConnection;
use sqlx::pool::PoolConnection;
use sqlx::{Row, Sqlite};
use tracing::warn;

use super::{classify_write_error, question_from_row, Repository};

const DUPLICATE_IMAGE_URL: &str = "duplicate-image-url";

const SELECT_QUESTION: &str =
    "SELECT id, image_url, correct_answer, options_json, category_id FROM question";

impl Repository {
    /// Insert a question after validating it.
    ///
    /// # Errors
    /// `StoreError::Invalid` for a malformed question, `StoreError::Duplicate`
    /// if the image URL is taken, `StoreError::UnknownCategory` if the
    /// category does not exist.
    pub async fn create_question(&self, question: &NewQuestion) -> Result<Question, StoreError> {
        let question = question.clone().into_validated()?;
        let options = question.answer_options();
        let options_json = options.encode().map_err(StoreError::Encode)?;

        let result = sqlx::query(
            r#"
            INSERT INTO question (image_url, correct_answer, options_json, category_id, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(question.image_url.as_str())
        .bind(question.correct_answer.as_str())
        .bind(options_json)
        .bind(question.category_id.map(|c| c.as_i64()))
        .bind(chrono::Utc::now().timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, DUPLICATE_IMAGE_URL, question.category_id))?;

        Ok(Question {
            id: QuestionId::new(result.last_insert_rowid()),
            image_url: question.image_url,
            correct_answer: question.correct_answer,
            options,
            category_id: question.category_id,
        })
    }

    /// Replace every field of a question. Returns `None` if it does not exist.
    pub async fn update_question(
        &self,
        id: QuestionId,
        question: &NewQuestion,
    ) -> Result<Option<Question>, StoreError> {
        let question = question.clone().into_validated()?;
        let options = question.answer_options();
        let options_json = options.encode().map_err(StoreError::Encode)?;

        let result = sqlx::query(
            r#"
            UPDATE question
            SET image_url = ?, correct_answer = ?, options_json = ?, category_id = ?
            WHERE id = ?
            "#,
        )
        .bind(question.image_url.as_str())
        .bind(question.correct_answer.as_str())
        .bind(options_json)
        .bind(question.category_id.map(|c| c.as_i64()))
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, DUPLICATE_IMAGE_URL, question.category_id))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(Question {
            id,
            image_url: question.image_url,
            correct_answer: question.correct_answer,
            options,
            category_id: question.category_id,
        }))
    }

    /// Every question in id order, for the admin listing.
    pub async fn list_all_questions(&self) -> Result<Vec<Question>, StoreError> {
        self.list_questions(&QuestionFilter::all()).await
    }

    pub async fn delete_question(&self, id: QuestionId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM question WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl QuestionStore for Repository {
    async fn list_questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>, StoreError> {
        // SQLite caps bound parameters at 999; past that, filter in memory.
        const MAX_BOUND_EXCLUDES: usize = 500;
        let bind_excludes =
            !filter.exclude.is_empty() && filter.exclude.len() <= MAX_BOUND_EXCLUDES;

        let mut sql = format!("{SELECT_QUESTION} WHERE 1 = 1");
        if filter.category_id.is_some() {
            sql.push_str(" AND category_id = ?");
        }
        if bind_excludes {
            let placeholders = vec!["?"; filter.exclude.len()].join(",");
            sql.push_str(&format!(" AND id NOT IN ({})", placeholders));
        }
        sql.push_str(" ORDER BY id ASC");

        let mut query = sqlx::query(&sql);
        if let Some(category_id) = filter.category_id {
            query = query.bind(category_id.as_i64());
        }
        if bind_excludes {
            for id in &filter.exclude {
                query = query.bind(id.as_i64());
            }
        }

        let rows = query.fetch_all(&self.pool).await?;
        let questions = rows
            .iter()
            .map(question_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        if bind_excludes {
            Ok(questions)
        } else {
            Ok(questions.into_iter().filter(|q| filter.matches(q)).collect())
        }
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StoreError> {
        let row = sqlx::query(&format!("{SELECT_QUESTION} WHERE id = ?"))
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(question_from_row).transpose()
    }

    async fn count_questions(&self) -> Result<i64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM question")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get::<i64, _>("n"))
    }

    async fn insert_questions_batch(&self, questions: &[NewQuestion]) -> Result<usize, StoreError> {
        if questions.is_empty() {
            return Ok(0);
        }

        let validated = questions
            .iter()
            .cloned()
            .map(NewQuestion::into_validated)
            .collect::<Result<Vec<_>, _>>()?;

        // IMMEDIATE takes the write lock up front, so concurrent seeders wait
        // on busy_timeout instead of failing on a stale WAL snapshot.
        let mut conn = self.pool.acquire().await?;
        sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;

        let outcome = insert_all(&mut conn, &validated).await;
        commit_or_rollback(&mut conn, outcome).await
    }
}

/// Close the transaction opened with `BEGIN IMMEDIATE`. A failed insert or a
/// failed COMMIT both end in ROLLBACK; a connection that cannot be rolled back
/// is closed instead of returning to the pool mid-transaction.
async fn commit_or_rollback(
    conn: &mut PoolConnection<Sqlite>,
    outcome: Result<usize, StoreError>,
) -> Result<usize, StoreError> {
    let outcome = match outcome {
        Ok(total_inserted) => sqlx::query("COMMIT")
            .execute(&mut **conn)
            .await
            .map(|_| total_inserted)
            .map_err(StoreError::from),
        Err(err) => Err(err),
    };

    if outcome.is_err() {
        if let Err(rollback_err) = sqlx::query("ROLLBACK").execute(&mut **conn).await {
            warn!(error = %rollback_err, "Failed to roll back question batch");
            conn.close_on_drop();
        }
    }
    outcome
}

async fn insert_all(
    conn: &mut SqliteConnection,
    questions: &[NewQuestion],
) -> Result<usize, StoreError> {
    let mut total_inserted = 0usize;

    for question in questions {
        let options_json = question
            .answer_options()
            .encode()
            .map_err(StoreError::Encode)?;

        let result = sqlx::query(
            r#"
            INSERT INTO question (image_url, correct_answer, options_json, category_id, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(image_url) DO NOTHING
            "#,
        )
        .bind(question.image_url.as_str())
        .bind(question.correct_answer.as_str())
        .bind(options_json)
        .bind(question.category_id.map(|c| c.as_i64()))
        .bind(chrono::Utc::now().timestamp_millis())
        .execute(&mut *conn)
        .await
        .map_err(|e| classify_write_error(e, DUPLICATE_IMAGE_URL, question.category_id))?;

        if result.rows_affected() > 0 {
            total_inserted += 1;
        }
    }

    Ok(total_inserted)
}
