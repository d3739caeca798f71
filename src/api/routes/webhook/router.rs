//! Router for the webhook API

use std::sync::{Arc, RwLock};

use axum::{Json, Router, body::Bytes, extract::State, routing::post};
use serde_json::Value;

use super::public::{MESSAGE_RECEIVED, MailboxEvent, WebhookAck};
use crate::api::state::AppState;
use crate::core::AppConfig;
use crate::hyperspell::HyperspellClient;
use crate::mail::ingest_email;

type SharedState = Arc<RwLock<AppState>>;

async fn store_event(config: &AppConfig, event: MailboxEvent) {
    let Some(message) = event.message else {
        return;
    };
    if event.event.as_deref() != Some(MESSAGE_RECEIVED) {
        return;
    }

    let email = message.into_email();
    let client = match HyperspellClient::from_config(config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to store email {} in memory: {}", email.id, e);
            return;
        }
    };
    if let Err(e) = ingest_email(&client, &email).await {
        tracing::error!("Failed to store email {} in memory: {}", email.id, e);
    }
}

/// Handle events pushed by the mailbox provider. Always answers 200 so
/// the provider doesn't redeliver.
async fn agentmail_webhook(State(state): State<SharedState>, body: Bytes) -> Json<WebhookAck> {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!("Webhook processing error: {}", e);
            return Json(WebhookAck::failed());
        }
    };
    tracing::info!("AgentMail webhook received: {}", payload);

    match serde_json::from_value::<MailboxEvent>(payload) {
        Ok(event) => {
            let config = state
                .read()
                .expect("Unable to read share state")
                .config
                .clone();
            store_event(&config, event).await;
        }
        Err(e) => tracing::warn!("Ignoring unrecognized webhook event: {}", e),
    }

    Json(WebhookAck::received())
}

/// Create the webhook router
pub fn router() -> Router<SharedState> {
    Router::new().route("/agentmail", post(agentmail_webhook))
}
