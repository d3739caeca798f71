//! Router for the companion API

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};

use super::db as companion_db;
use super::public;
use crate::api::public::{ApiError, ErrorContext};
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

async fn get_companion(
    State(state): State<SharedState>,
) -> Result<Json<public::Companion>, ApiError> {
    let db = state.read().expect("Unable to read share state").db.clone();
    let companion = companion_db::get_default_companion(&db)
        .await
        .or_api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch companion")?;
    Ok(Json(companion))
}

/// Feed, play with, or train the default companion
async fn interact(
    State(state): State<SharedState>,
    payload: Result<Json<public::InteractRequest>, JsonRejection>,
) -> Result<Json<public::Companion>, ApiError> {
    let Ok(Json(payload)) = payload else {
        return Err(ApiError::bad_request("Invalid action"));
    };
    let db = state.read().expect("Unable to read share state").db.clone();

    let companion = companion_db::get_default_companion(&db)
        .await
        .or_api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update companion")?;
    let updated = companion_db::update_companion(&db, companion.interact(payload.action))
        .await
        .or_api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update companion")?;

    Ok(Json(updated))
}

/// Create the companion router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(get_companion))
        .route("/interact", post(interact))
}
