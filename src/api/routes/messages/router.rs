//! Router for the companion chat API

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use axum_extra::extract::Query;

use super::db as messages_db;
use super::public;
use crate::api::public::{ApiError, ErrorContext};
use crate::api::routes::companion::db::get_default_companion;
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

async fn list_messages(
    State(state): State<SharedState>,
    Query(params): Query<public::MessagesQuery>,
) -> Result<Json<Vec<public::ChatMessage>>, ApiError> {
    let db = state.read().expect("Unable to read share state").db.clone();
    let message = "Failed to fetch messages";
    let companion = get_default_companion(&db)
        .await
        .or_api_error(StatusCode::INTERNAL_SERVER_ERROR, message)?;

    let conversation_with = params.conversation_with.filter(|name| !name.is_empty());
    let messages = messages_db::list_messages(&db, companion.id, conversation_with)
        .await
        .or_api_error(StatusCode::INTERNAL_SERVER_ERROR, message)?;
    Ok(Json(messages))
}

async fn send_message(
    State(state): State<SharedState>,
    payload: Result<Json<public::NewChatMessage>, JsonRejection>,
) -> Result<Json<public::ChatMessage>, ApiError> {
    let message = "Failed to send message";
    let Json(payload) = payload.or_api_error(StatusCode::BAD_REQUEST, message)?;
    let db = state.read().expect("Unable to read share state").db.clone();

    let companion = get_default_companion(&db)
        .await
        .or_api_error(StatusCode::BAD_REQUEST, message)?;
    let sent = messages_db::insert_message(&db, companion.id, payload)
        .await
        .or_api_error(StatusCode::BAD_REQUEST, message)?;
    Ok(Json(sent))
}

/// Create the messages router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", get(list_messages).post(send_message))
}
