use axum::extract::State;
use axum::Json;

use crate::api::AppState;
use crate::domain::Category;
use crate::error::AppError;

/// Public category listing for the game's category picker.
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(state.repo.list_categories().await?))
}
