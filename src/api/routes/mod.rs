//! API routes module

pub mod agentmail;
pub mod companion;
pub mod debug;
pub mod inventory;
pub mod journal;
pub mod messages;
pub mod search_history;
pub mod store;
pub mod webhook;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Companion stats and interactions
        .nest("/companion", companion::router())
        // Store catalogue
        .nest("/store", store::router())
        // Inventory routes
        .nest("/inventory", inventory::router())
        // Journal routes
        .nest("/journal", journal::router())
        // Companion chat messages
        .nest("/messages", messages::router())
        // Mailbox and memory search routes
        .nest("/agentmail", agentmail::router())
        // Saved memory searches
        .nest("/search-history", search_history::router())
        // Inbound provider webhooks
        .nest("/webhooks", webhook::router())
        // Configuration diagnostics
        .nest("/debug", debug::router())
}
