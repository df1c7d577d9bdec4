#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value as JsonValue;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use jobboard_backend::AppState;

/// DB-backed tests only run when a database is configured; everything else
/// in the suite stays green without one.
pub async fn setup_state() -> Option<AppState> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping database-backed test");
        return None;
    };

    ensure_config();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("connect to test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("run migrations");

    Some(AppState::new(pool))
}

pub fn ensure_config() {
    if std::env::var("SERVER_ADDRESS").is_err() {
        std::env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    }
    if std::env::var("JWT_SECRET").is_err() {
        std::env::set_var("JWT_SECRET", "test_secret_key");
    }
    if std::env::var("UPLOADS_DIR").is_err() {
        let dir = std::env::temp_dir().join(format!("jobboard-test-uploads-{}", std::process::id()));
        std::env::set_var("UPLOADS_DIR", dir);
    }
    // Tests share one binary; only the first call initializes.
    let _ = jobboard_backend::config::init_config();
}

pub async fn reset_db(state: &AppState) {
    for table in ["applications", "candidates", "positions", "admins"] {
        sqlx::query(&format!("DELETE FROM {}", table))
            .execute(&state.pool)
            .await
            .expect("reset table");
    }
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 16 * 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, json)
}
