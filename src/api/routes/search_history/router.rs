//! Router for the search history API

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use axum_extra::extract::Query;

use super::db as history_db;
use super::public;
use crate::api::public::{ApiError, ErrorContext};
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

async fn list_searches(
    State(state): State<SharedState>,
    Query(params): Query<public::HistoryQuery>,
) -> Result<Json<Vec<public::SearchHistoryEntry>>, ApiError> {
    let db = state.read().expect("Unable to read share state").db.clone();
    let entries = history_db::list_searches(&db, params.limit())
        .await
        .or_api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch search history")?;
    Ok(Json(entries))
}

/// Create the search history router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", get(list_searches))
}
