//! First-boot seeding of the default question set.

use crate::domain::{NewQuestion, ValidationError};
use crate::store::{QuestionStore, StoreError};
use thiserror::Error;
use tracing::info;

/// One default question: poster filename, correct answer, ordered options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRecord {
    pub filename: String,
    pub correct_answer: String,
    pub options: Vec<String>,
}

impl SeedRecord {
    pub fn new(filename: &str, correct_answer: &str, options: &[&str]) -> Self {
        Self {
            filename: filename.to_string(),
            correct_answer: correct_answer.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    /// Build the question, joining `base_url` and the filename with one `/`.
    pub fn to_new_question(&self, base_url: &str) -> NewQuestion {
        NewQuestion::new(
            image_url(base_url, &self.filename),
            self.correct_answer.as_str(),
            self.options.clone(),
            None,
        )
    }
}

pub fn image_url(base_url: &str, filename: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        filename.trim_start_matches('/')
    )
}

/// The five posters shipped with the service.
pub fn default_seed() -> Vec<SeedRecord> {
    vec![
        SeedRecord::new("1.png", "Матрица", &["Матрица", "Начало", "Терминатор", "Дюна"]),
        SeedRecord::new(
            "2.png",
            "Побег из Шоушенка",
            &["Побег из Шоушенка", "Зелёная миля", "Форрест Гамп", "Остров проклятых"],
        ),
        SeedRecord::new(
            "3.png",
            "Начало",
            &["Начало", "Интерстеллар", "Престиж", "Бегущий по лезвию"],
        ),
        SeedRecord::new(
            "4.png",
            "Интерстеллар",
            &["Интерстеллар", "Марсианин", "Гравитация", "Контакт"],
        ),
        SeedRecord::new(
            "5.png",
            "Форрест Гамп",
            &["Форрест Гамп", "Зелёная миля", "Одержимость", "1+1"],
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The bank already held this many questions.
    Skipped { existing: i64 },
    Inserted(usize),
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("seed record {filename} is invalid: {source}")]
    InvalidRecord {
        filename: String,
        #[source]
        source: ValidationError,
    },
    #[error("seeding failed: {0}")]
    Store(#[from] StoreError),
}

/// Insert `records` if the bank is empty; otherwise do nothing.
///
/// Safe to call on every start. Concurrent callers cannot double-insert:
/// the batch insert skips image URLs that already exist.
pub async fn seed_if_empty(
    store: &dyn QuestionStore,
    base_url: &str,
    records: &[SeedRecord],
) -> Result<SeedOutcome, SeedError> {
    let existing = store.count_questions().await?;
    if existing > 0 {
        info!(existing, "Question bank not empty, skipping seed");
        return Ok(SeedOutcome::Skipped { existing });
    }

    let questions = records
        .iter()
        .map(|record| {
            record
                .to_new_question(base_url)
                .into_validated()
                .map_err(|source| SeedError::InvalidRecord {
                    filename: record.filename.clone(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let inserted = store.insert_questions_batch(&questions).await?;
    info!(inserted, base_url, "Seeded default questions");
    Ok(SeedOutcome::Inserted(inserted))
}
