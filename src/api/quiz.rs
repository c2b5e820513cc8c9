use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::AppState;
use crate::domain::{CategoryId, QuestionId, QuestionPrompt};
use crate::error::AppError;
use crate::quiz::{parse_exclude, AnswerVerdict};
use crate::store::QuestionFilter;

#[derive(Debug, Deserialize)]
pub struct QuestionQuery {
    /// Comma-separated ids already shown to the player.
    pub exclude: Option<String>,
    pub category_id: Option<CategoryId>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub question_id: QuestionId,
    pub answer: String,
}

pub async fn get_question(
    ApiQuery(params): ApiQuery<QuestionQuery>,
    State(state): State<AppState>,
) -> Result<Json<QuestionPrompt>, AppError> {
    let filter = QuestionFilter {
        exclude: parse_exclude(params.exclude.as_deref())?,
        category_id: params.category_id,
    };

    let prompt = state.selector.get_question(&filter).await?;
    Ok(Json(prompt))
}

pub async fn post_answer(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<AnswerRequest>,
) -> Result<Json<AnswerVerdict>, AppError> {
    let verdict = state
        .verifier
        .check_answer(body.question_id, &body.answer)
        .await?;
    Ok(Json(verdict))
}
