pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod quiz;
pub mod seed;
pub mod store;

pub use config::Config;
pub use db::{init_db, Repository};
pub use domain::{
    AnswerOptions, Category, CategoryId, NewCategory, NewQuestion, Question, QuestionId,
    QuestionPrompt, ValidationError,
};
pub use error::AppError;
pub use quiz::{AnswerVerdict, AnswerVerifier, QuestionSelector, QuizError};
pub use seed::{default_seed, seed_if_empty, SeedOutcome, SeedRecord};
pub use store::{MemoryStore, QuestionFilter, QuestionStore, StoreError};
