pub mod admin;
pub mod categories;
pub mod extract;
pub mod health;
pub mod quiz;

use crate::config::Config;
use crate::db::Repository;
use crate::quiz::{AnswerVerifier, QuestionSelector};
use crate::store::QuestionStore;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Config,
    pub selector: Arc<QuestionSelector>,
    pub verifier: Arc<AnswerVerifier>,
}

impl AppState {
    pub fn new(repo: Arc<Repository>, config: Config) -> Self {
        let store: Arc<dyn QuestionStore> = repo.clone();
        Self {
            repo,
            config,
            selector: Arc::new(QuestionSelector::new(store.clone())),
            verifier: Arc::new(AnswerVerifier::new(store)),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/ping", get(health::ping))
        .route("/question", get(quiz::get_question))
        .route("/answer", post(quiz::post_answer))
        .route("/categories", get(categories::list_categories));

    if state.config.admin_token.is_some() {
        router = router.nest("/admin/api", admin::router(state.clone()));
    } else {
        tracing::warn!("ADMIN_TOKEN is not set; admin API disabled");
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
