//! Router for the debug API

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State, routing::get};

use super::public::EnvReport;
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

async fn env_report(State(state): State<SharedState>) -> Json<EnvReport> {
    let state = state.read().expect("Unable to read share state");
    Json(EnvReport::from(&state.config))
}

/// Create the debug router
pub fn router() -> Router<SharedState> {
    Router::new().route("/env", get(env_report))
}
