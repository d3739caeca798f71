//! Router for the inventory API

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, patch, post},
};

use super::db as inventory_db;
use super::public;
use crate::api::public::{ApiError, ErrorContext};
use crate::api::routes::companion::db::get_default_companion;
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

async fn list_inventory(
    State(state): State<SharedState>,
) -> Result<Json<Vec<public::InventoryEntry>>, ApiError> {
    let db = state.read().expect("Unable to read share state").db.clone();
    let message = "Failed to fetch inventory";
    let companion = get_default_companion(&db)
        .await
        .or_api_error(StatusCode::INTERNAL_SERVER_ERROR, message)?;
    let entries = inventory_db::list_inventory(&db, companion.id)
        .await
        .or_api_error(StatusCode::INTERNAL_SERVER_ERROR, message)?;
    Ok(Json(entries))
}

/// Buy one of a store item for the default companion
async fn purchase(
    State(state): State<SharedState>,
    payload: Result<Json<public::PurchaseRequest>, JsonRejection>,
) -> Result<Json<public::InventoryItem>, ApiError> {
    let message = "Failed to purchase item";
    let Json(payload) = payload.or_api_error(StatusCode::BAD_REQUEST, message)?;
    let db = state.read().expect("Unable to read share state").db.clone();

    let companion = get_default_companion(&db)
        .await
        .or_api_error(StatusCode::BAD_REQUEST, message)?;
    let row = inventory_db::add_to_inventory(&db, companion.id, payload.item_id, 1)
        .await
        .or_api_error(StatusCode::BAD_REQUEST, message)?;
    Ok(Json(row))
}

async fn equip(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<public::EquipRequest>, JsonRejection>,
) -> Result<Json<public::InventoryItem>, ApiError> {
    let message = "Failed to update inventory item";
    let Json(payload) = payload.or_api_error(StatusCode::BAD_REQUEST, message)?;
    let db = state.read().expect("Unable to read share state").db.clone();

    let row = inventory_db::set_equipped(&db, id, payload.equipped)
        .await
        .or_api_error(StatusCode::BAD_REQUEST, message)?;
    Ok(Json(row))
}

/// Create the inventory router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(list_inventory))
        .route("/purchase", post(purchase))
        .route("/{id}/equip", patch(equip))
}
