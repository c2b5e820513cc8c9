//! Admin CRUD for categories and questions.
//!
//! Routes mirror the admin front end's data provider:
//! `/<resource>/list`, `/<resource>/:id`, `/<resource>/create`,
//! `/<resource>/update/:id`, `/<resource>/delete/:id`.
//! Every route requires `Authorization: Bearer <ADMIN_TOKEN>`.

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use subtle::ConstantTimeEq;

use crate::api::extract::{ApiJson, ApiPath};
use crate::api::AppState;
use crate::domain::{Category, CategoryId, NewCategory, NewQuestion, Question, QuestionId};
use crate::error::{AppError, CATEGORY_NOT_FOUND, QUESTION_NOT_FOUND};
use crate::store::QuestionStore;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/category/list", get(list_categories))
        .route("/category/create", post(create_category))
        .route("/category/update/:id", post(update_category))
        .route("/category/delete/:id", delete(delete_category))
        .route("/category/:id", get(get_category))
        .route("/question/list", get(list_questions))
        .route("/question/create", post(create_question))
        .route("/question/update/:id", post(update_question))
        .route("/question/delete/:id", delete(delete_question))
        .route("/question/:id", get(get_question))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}

async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let expected = state
        .config
        .admin_token
        .as_deref()
        .ok_or(AppError::Unauthorized)?;

    let authorized = bearer_token(request.headers())
        .map(|token| bool::from(token.as_bytes().ct_eq(expected.as_bytes())))
        .unwrap_or(false);
    if !authorized {
        tracing::warn!(path = %request.uri().path(), "Rejected admin request");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(state.repo.list_categories().await?))
}

async fn get_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CategoryId>,
) -> Result<Json<Category>, AppError> {
    state
        .repo
        .get_category(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(CATEGORY_NOT_FOUND))
}

async fn create_category(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewCategory>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let category = state.repo.create_category(&body).await?;
    tracing::info!(category_id = %category.id, name = %category.name, "Created category");
    Ok((StatusCode::CREATED, Json(category)))
}

async fn update_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CategoryId>,
    ApiJson(body): ApiJson<NewCategory>,
) -> Result<Json<Category>, AppError> {
    let category = state
        .repo
        .update_category(id, &body)
        .await?
        .ok_or(AppError::NotFound(CATEGORY_NOT_FOUND))?;
    tracing::info!(category_id = %id, "Updated category");
    Ok(Json(category))
}

async fn delete_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CategoryId>,
) -> Result<StatusCode, AppError> {
    if !state.repo.delete_category(id).await? {
        return Err(AppError::NotFound(CATEGORY_NOT_FOUND));
    }
    tracing::info!(category_id = %id, "Deleted category");
    Ok(StatusCode::NO_CONTENT)
}

async fn list_questions(State(state): State<AppState>) -> Result<Json<Vec<Question>>, AppError> {
    Ok(Json(state.repo.list_all_questions().await?))
}

async fn get_question(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<QuestionId>,
) -> Result<Json<Question>, AppError> {
    state
        .repo
        .get_question(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(QUESTION_NOT_FOUND))
}

async fn create_question(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewQuestion>,
) -> Result<(StatusCode, Json<Question>), AppError> {
    let question = state.repo.create_question(&body).await?;
    tracing::info!(question_id = %question.id, image_url = %question.image_url, "Created question");
    Ok((StatusCode::CREATED, Json(question)))
}

async fn update_question(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<QuestionId>,
    ApiJson(body): ApiJson<NewQuestion>,
) -> Result<Json<Question>, AppError> {
    let question = state
        .repo
        .update_question(id, &body)
        .await?
        .ok_or(AppError::NotFound(QUESTION_NOT_FOUND))?;
    tracing::info!(question_id = %id, "Updated question");
    Ok(Json(question))
}

async fn delete_question(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<QuestionId>,
) -> Result<StatusCode, AppError> {
    if !state.repo.delete_question(id).await? {
        return Err(AppError::NotFound(QUESTION_NOT_FOUND));
    }
    tracing::info!(question_id = %id, "Deleted question");
    Ok(StatusCode::NO_CONTENT)
}
