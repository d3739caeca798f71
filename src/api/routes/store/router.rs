//! Router for the store API

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use super::db as store_db;
use super::public;
use crate::api::public::{ApiError, ErrorContext};
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

async fn list_items(State(state): State<SharedState>) -> Result<Json<Vec<public::Item>>, ApiError> {
    let db = state.read().expect("Unable to read share state").db.clone();
    let items = store_db::list_items(&db)
        .await
        .or_api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch items")?;
    Ok(Json(items))
}

/// Create the store router
pub fn router() -> Router<SharedState> {
    Router::new().route("/items", get(list_items))
}
