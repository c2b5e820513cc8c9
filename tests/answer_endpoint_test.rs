use axum::http::StatusCode;
use movie_quiz::api::{self, AppState};
use movie_quiz::config::Config;
use movie_quiz::db::init_db;
use movie_quiz::seed::{default_seed, seed_if_empty};
use movie_quiz::{QuestionFilter, QuestionStore, Repository};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

struct TestApp {
    app: axum::Router,
    repo: Arc<Repository>,
    _temp: TempDir,
}

async fn setup_test_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("quiz.db")
        .to_string_lossy()
        .to_string();
    let pool = init_db(&db_path).await.expect("init_db failed");
    let repo = Arc::new(Repository::new(pool));
    seed_if_empty(&*repo, "/posters", &default_seed())
        .await
        .expect("seed failed");

    let config = Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        database_path: db_path,
        image_base_url: "/posters".to_string(),
        admin_token: None,
    };
    let app = api::create_router(AppState::new(repo.clone(), config));

    TestApp {
        app,
        repo,
        _temp: temp_dir,
    }
}

async fn post_answer(app: axum::Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/answer")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_every_seeded_answer_is_correct() {
    let test_app = setup_test_app().await;
    let questions = test_app
        .repo
        .list_questions(&QuestionFilter::all())
        .await
        .unwrap();
    assert_eq!(questions.len(), 5);

    for q in questions {
        let (status, json) = post_answer(
            test_app.app.clone(),
            serde_json::json!({"question_id": q.id, "answer": q.correct_answer}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["correct"], true);
        assert_eq!(json["correct_answer"], q.correct_answer.as_str());
    }
}

#[tokio::test]
async fn test_surrounding_whitespace_is_trimmed() {
    let test_app = setup_test_app().await;

    let (status, json) = post_answer(
        test_app.app,
        serde_json::json!({"question_id": 1, "answer": "  Матрица  "}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["correct"], true);
}

#[tokio::test]
async fn test_wrong_answer_reveals_correct_answer() {
    let test_app = setup_test_app().await;

    let (status, json) = post_answer(
        test_app.app,
        serde_json::json!({"question_id": 1, "answer": "Начало"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        serde_json::json!({"correct": false, "correct_answer": "Матрица"})
    );
}

#[tokio::test]
async fn test_comparison_is_case_sensitive() {
    let test_app = setup_test_app().await;

    let (status, json) = post_answer(
        test_app.app,
        serde_json::json!({"question_id": 1, "answer": "МАТРИЦА"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["correct"], false);
}

#[tokio::test]
async fn test_unknown_question_returns_404() {
    let test_app = setup_test_app().await;

    let (status, json) = post_answer(
        test_app.app,
        serde_json::json!({"question_id": 999, "answer": "x"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["detail"], "Question not found");
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let test_app = setup_test_app().await;

    let (status, json) = post_answer(
        test_app.app.clone(),
        serde_json::json!({"question_id": "one", "answer": "x"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["detail"], "invalid-body");

    let (status, json) = post_answer(test_app.app, serde_json::json!({"question_id": 1})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["detail"], "invalid-body");
}

#[tokio::test]
async fn test_missing_content_type_rejected() {
    let test_app = setup_test_app().await;
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/answer")
        .body(axum::body::Body::from(r#"{"question_id": 1, "answer": "x"}"#))
        .unwrap();

    let resp = test_app.app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["detail"], "expected-json");
}

#[tokio::test]
async fn test_unparseable_json_rejected() {
    let test_app = setup_test_app().await;
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/answer")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"question_id\": 1,"))
        .unwrap();

    let resp = test_app.app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["detail"], "invalid-body");
}
