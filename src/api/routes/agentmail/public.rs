//! Public types for the mailbox API
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use crate::mail::{ConversationSummary, NormalizedEmail};

pub const DEFAULT_MAX_RESULTS: usize = 10;
pub const NO_ANSWER: &str = "No answer provided";

#[derive(Default, Deserialize)]
pub struct EmailsQuery {
    pub from: Option<String>,
}

/// Outgoing email. Every field is required but checked by the handler
/// so a missing one gets a descriptive 400.
#[derive(Default, Deserialize)]
pub struct SendEmailRequest {
    pub to: Option<String>,
    pub subject: Option<String>,
    pub text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEmailsRequest {
    pub query: Option<String>,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchEmailsResponse {
    pub answer: Option<String>,
    pub documents: Vec<Value>,
    pub query: String,
}
