//! Public types for the companion chat API
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub companion_id: String,
    pub conversation_with: String,
    pub sender_name: String,
    pub text: String,
    pub is_own: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChatMessage {
    pub conversation_with: String,
    pub sender_name: String,
    pub text: String,
    #[serde(default)]
    pub is_own: i64,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesQuery {
    pub conversation_with: Option<String>,
}
