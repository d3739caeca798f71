//! Public types for the journal API
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub companion_id: String,
    pub title: String,
    pub content: String,
    pub mood: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct NewJournalEntry {
    pub title: String,
    pub content: String,
    pub mood: String,
}
