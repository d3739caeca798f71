//! Public API types

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde_json::json;

// Errors

/// Error returned from any handler. Rendered as `{"error": message}`
/// with the given status.
pub struct ApiError {
    status: StatusCode,
    message: String,
    source: Option<anyhow::Error>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
            source: None,
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Always log the error
        match &self.source {
            Some(source) => tracing::error!("{}: {:#}", self.message, source),
            None if self.status.is_server_error() => tracing::error!("{}", self.message),
            None => tracing::warn!("{}", self.message),
        }

        let body = match &self.source {
            Some(source) if self.status.is_server_error() => {
                json!({ "error": self.message, "details": source.to_string() })
            }
            _ => json!({ "error": self.message }),
        };

        (self.status, Json(body)).into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`. The error
/// itself becomes the message so configuration problems are reported
/// verbatim.
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err: anyhow::Error = err.into();
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
    }
}

/// Attach a client-facing status and message to any error.
pub trait ErrorContext<T> {
    fn or_api_error(self, status: StatusCode, message: &str) -> Result<T, ApiError>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn or_api_error(self, status: StatusCode, message: &str) -> Result<T, ApiError> {
        self.map_err(|e| ApiError {
            status,
            message: message.to_string(),
            source: Some(e.into()),
        })
    }
}

// Re-export public types from each route

pub mod agentmail {
    pub use crate::api::routes::agentmail::public::*;
}

pub mod companion {
    pub use crate::api::routes::companion::public::*;
}

pub mod debug {
    pub use crate::api::routes::debug::public::*;
}

pub mod inventory {
    pub use crate::api::routes::inventory::public::*;
}

pub mod journal {
    pub use crate::api::routes::journal::public::*;
}

pub mod messages {
    pub use crate::api::routes::messages::public::*;
}

pub mod search_history {
    pub use crate::api::routes::search_history::public::*;
}

pub mod store {
    pub use crate::api::routes::store::public::*;
}

pub mod webhook {
    pub use crate::api::routes::webhook::public::*;
}
