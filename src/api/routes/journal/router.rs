//! Router for the journal API

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};

use super::db as journal_db;
use super::public;
use crate::api::public::{ApiError, ErrorContext};
use crate::api::routes::companion::db::get_default_companion;
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

async fn list_entries(
    State(state): State<SharedState>,
) -> Result<Json<Vec<public::JournalEntry>>, ApiError> {
    let db = state.read().expect("Unable to read share state").db.clone();
    let message = "Failed to fetch journal entries";
    let companion = get_default_companion(&db)
        .await
        .or_api_error(StatusCode::INTERNAL_SERVER_ERROR, message)?;
    let entries = journal_db::list_entries(&db, companion.id)
        .await
        .or_api_error(StatusCode::INTERNAL_SERVER_ERROR, message)?;
    Ok(Json(entries))
}

async fn create_entry(
    State(state): State<SharedState>,
    payload: Result<Json<public::NewJournalEntry>, JsonRejection>,
) -> Result<Json<public::JournalEntry>, ApiError> {
    let message = "Failed to create journal entry";
    let Json(payload) = payload.or_api_error(StatusCode::BAD_REQUEST, message)?;
    let db = state.read().expect("Unable to read share state").db.clone();

    let companion = get_default_companion(&db)
        .await
        .or_api_error(StatusCode::BAD_REQUEST, message)?;
    let entry = journal_db::insert_entry(&db, companion.id, payload)
        .await
        .or_api_error(StatusCode::BAD_REQUEST, message)?;
    Ok(Json(entry))
}

/// Create the journal router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", get(list_entries).post(create_entry))
}
