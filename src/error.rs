use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::domain::ValidationError;
use crate::quiz::QuizError;
use crate::store::StoreError;

pub const QUESTION_NOT_FOUND: &str = "Question not found";
pub const CATEGORY_NOT_FOUND: &str = "Category not found";

/// Errors surfaced to HTTP clients as `{"detail": "<reason>"}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(&'static str),
    #[error("No more questions")]
    NoMoreQuestions,
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Unsupported media type")]
    UnsupportedMediaType,
    #[error("Conflict: {0}")]
    Conflict(&'static str),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected JSON body: {}", rejection.body_text());
        match rejection {
            JsonRejection::MissingJsonContentType(_) => AppError::UnsupportedMediaType,
            _ => AppError::BadRequest("invalid-body".to_string()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Rejected query string: {}", rejection.body_text());
        AppError::BadRequest("invalid-query".to_string())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path: {}", rejection.body_text());
        AppError::BadRequest("invalid-id".to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        tracing::debug!("Rejected input: {}", err);
        AppError::BadRequest(err.reason().to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Invalid(e) => e.into(),
            StoreError::Duplicate(reason) => AppError::Conflict(reason),
            StoreError::UnknownCategory(_) => AppError::BadRequest("unknown-category".to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<QuizError> for AppError {
    fn from(err: QuizError) -> Self {
        match err {
            QuizError::NoMoreQuestions => AppError::NoMoreQuestions,
            QuizError::QuestionNotFound(_) => AppError::NotFound(QUESTION_NOT_FOUND),
            QuizError::Store(e) => e.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            AppError::NoMoreQuestions => (StatusCode::NOT_FOUND, "no-more-questions".to_string()),
            AppError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason),
            AppError::UnsupportedMediaType => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "expected-json".to_string(),
            ),
            AppError::Conflict(reason) => (StatusCode::CONFLICT, reason.to_string()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal-error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "detail": detail,
        }));

        (status, body).into_response()
    }
}
