//! Router for the mailbox API: conversations, emails, sending and
//! memory search over ingested emails.

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::{Request, State, rejection::JsonRejection},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::extract::Query;
use http::{HeaderValue, header};
use serde_json::Value;

use super::public;
use crate::agentmail::{AgentMailClient, MailboxProvider, SendMessageRequest};
use crate::api::public::{ApiError, ErrorContext};
use crate::api::routes::search_history::db::insert_search;
use crate::api::state::AppState;
use crate::core::AppConfig;
use crate::hyperspell::{HyperspellClient, MemoryStore, SearchRequest};
use crate::mail::{self, EmailMetadata, metadata};

type SharedState = Arc<RwLock<AppState>>;

fn config(state: &SharedState) -> AppConfig {
    state
        .read()
        .expect("Unable to read share state")
        .config
        .clone()
}

fn mailbox(config: &AppConfig) -> Result<Arc<dyn MailboxProvider>, ApiError> {
    let client = AgentMailClient::from_config(config)?;
    Ok(Arc::new(client))
}

async fn set_no_store(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate"),
    );
    response
}

async fn list_conversations(
    State(state): State<SharedState>,
) -> Result<Json<Vec<public::ConversationSummary>>, ApiError> {
    let provider = mailbox(&config(&state))?;
    let conversations = mail::list_conversations(provider)
        .await
        .or_api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch conversations")?;
    Ok(Json(conversations))
}

/// List emails, optionally from one sender, and store each of them in
/// memory before responding.
async fn list_emails(
    State(state): State<SharedState>,
    Query(params): Query<public::EmailsQuery>,
) -> Result<Json<Vec<public::NormalizedEmail>>, ApiError> {
    let config = config(&state);
    let provider = mailbox(&config)?;
    let from = params.from.as_deref().filter(|f| !f.is_empty());

    let emails = mail::list_emails(provider, from)
        .await
        .or_api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch messages")?;

    match HyperspellClient::from_config(&config) {
        Ok(client) => {
            let stored = mail::ingest_emails(Arc::new(client), &emails).await;
            tracing::info!("Stored {} of {} emails in memory", stored, emails.len());
        }
        Err(e) => tracing::error!("Skipping memory ingestion: {}", e),
    }

    Ok(Json(emails))
}

/// Send an email from the first inbox with the demo metadata envelope
/// appended to the body.
async fn send_email(
    State(state): State<SharedState>,
    payload: Result<Json<public::SendEmailRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let non_empty = |s: Option<String>| s.filter(|s| !s.is_empty());
    let (Some(to), Some(subject), Some(text)) = (
        non_empty(payload.to),
        non_empty(payload.subject),
        non_empty(payload.text),
    ) else {
        return Err(ApiError::bad_request(
            "Missing required fields: to, subject, text",
        ));
    };

    let provider = mailbox(&config(&state))?;
    let message = "Failed to send email";
    let inboxes = provider
        .list_inboxes()
        .await
        .or_api_error(StatusCode::INTERNAL_SERVER_ERROR, message)?;
    let Some(inbox) = inboxes.into_iter().next() else {
        return Err(ApiError::bad_request(
            "No inbox found. Please create an inbox first.",
        ));
    };

    let request = SendMessageRequest {
        to: vec![to],
        subject,
        text: metadata::encode(&text, &EmailMetadata::demo()),
    };
    let result = provider
        .send_message(&inbox.inbox_id, &request)
        .await
        .or_api_error(StatusCode::INTERNAL_SERVER_ERROR, message)?;

    tracing::info!("Sent email from inbox {}", inbox.inbox_id);
    Ok(Json(result))
}

/// Ask the memory store about ingested emails and record the search.
async fn search_emails(
    State(state): State<SharedState>,
    payload: Result<Json<public::SearchEmailsRequest>, JsonRejection>,
) -> Result<Json<public::SearchEmailsResponse>, ApiError> {
    let missing_query = "Missing 'query' parameter";
    let Json(payload) = payload.or_api_error(StatusCode::BAD_REQUEST, missing_query)?;
    let Some(query) = payload.query.filter(|q| !q.is_empty()) else {
        return Err(ApiError::bad_request(missing_query));
    };

    let (db, config) = {
        let state = state.read().expect("Unable to read share state");
        (state.db.clone(), state.config.clone())
    };
    let client = HyperspellClient::from_config(&config)?;

    tracing::info!("Searching emails for: {}", query);
    let response = client
        .search(&SearchRequest::emails(&query, payload.max_results))
        .await
        .or_api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to search emails")?;
    tracing::debug!("Found {} documents", response.documents.len());

    let answer = response
        .answer
        .clone()
        .unwrap_or_else(|| public::NO_ANSWER.to_string());
    let documents = serde_json::to_string(&response.documents).ok();
    if let Err(e) = insert_search(&db, query.clone(), answer, documents).await {
        tracing::error!("Failed to save search history: {}", e);
    }

    Ok(Json(public::SearchEmailsResponse {
        answer: response.answer,
        documents: response.documents,
        query,
    }))
}

/// Create the mailbox router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/conversations", get(list_conversations))
        .route("/messages", get(list_emails))
        .route("/send", post(send_email))
        .route("/search", post(search_emails))
        .layer(middleware::from_fn(set_no_store))
}
