//! Test utilities for integration tests
#![allow(dead_code)]
use std::sync::{Arc, RwLock};

use axum::{Router, body::Body, response::Response};
use serde_json::Value;

use plaipin::api::AppState;
use plaipin::api::app;
use plaipin::core::AppConfig;
use plaipin::core::db::{initialize_db, memory_db};

/// Config with both provider credentials set, pointing the providers at
/// `mock_url` (usually a `mockito` server).
pub fn test_config(mock_url: &str) -> AppConfig {
    AppConfig {
        storage_path: String::from("./"),
        db_path: String::from(":memory:"),
        static_path: String::from("./client/dist"),
        agentmail_api_url: mock_url.to_string(),
        agentmail_api_key: Some(String::from("test-agentmail-key")),
        hyperspell_api_url: mock_url.to_string(),
        hyperspell_api_key: Some(String::from("test-hyperspell-token")),
        openai_api_key: None,
    }
}

/// Config without any provider credentials.
pub fn unconfigured() -> AppConfig {
    AppConfig {
        agentmail_api_key: None,
        hyperspell_api_key: None,
        ..test_config("http://127.0.0.1:9")
    }
}

/// Creates a test application router backed by a freshly seeded
/// in-memory database.
pub async fn test_app_with_config(config: AppConfig) -> Router {
    let db = memory_db().await.expect("Failed to open in-memory db");
    db.call(|conn| {
        initialize_db(conn).expect("Failed to initialize db");
        Ok(())
    })
    .await
    .unwrap();

    let app_state = AppState::new(db, config);
    app(Arc::new(RwLock::new(app_state)))
}

pub async fn test_app() -> Router {
    test_app_with_config(unconfigured()).await
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_to_json(response: Response) -> Value {
    let body = body_to_string(response.into_body()).await;
    serde_json::from_str(&body).unwrap()
}
