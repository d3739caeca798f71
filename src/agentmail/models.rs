//! Request and response shapes for the AgentMail REST API (`/v0`)
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Read a timestamp without failing the surrounding payload. RFC 3339
/// strings and zone-less `YYYY-MM-DD HH:MM:SS` (taken as UTC) parse;
/// anything else becomes `None`.
pub(crate) fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::String(raw) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }
    let parsed = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc());
    if parsed.is_none() {
        tracing::warn!("Ignoring unparseable timestamp: {}", raw);
    }
    Ok(parsed)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inbox {
    pub inbox_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListInboxesResponse {
    #[serde(default)]
    pub inboxes: Vec<Inbox>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    pub thread_id: String,
    #[serde(default)]
    pub senders: Vec<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub received_timestamp: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct ListThreadsResponse {
    #[serde(default)]
    pub threads: Vec<Thread>,
}

/// The sender field shows up either as a plain string
/// (`"Joy <joy@example.com>"`) or as an object with an `address`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sender {
    Address { address: String },
    Raw(String),
}

impl Sender {
    pub fn address(&self) -> &str {
        match self {
            Sender::Address { address } => address,
            Sender::Raw(raw) => raw,
        }
    }
}

/// A message as returned by the listing endpoint. Listings don't
/// include the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSummary {
    pub message_id: String,
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub from: Option<Sender>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub received_timestamp: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl MessageSummary {
    pub fn sender(&self) -> &str {
        self.from.as_ref().map(Sender::address).unwrap_or_default()
    }

    pub fn received_at(&self) -> Option<DateTime<Utc>> {
        self.received_timestamp.or(self.timestamp)
    }
}

#[derive(Debug, Deserialize)]
pub struct ListMessagesResponse {
    #[serde(default)]
    pub messages: Vec<MessageSummary>,
}

/// A single message fetched by id, including its body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message_id: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
}

impl Message {
    /// Plain text body, falling back to the HTML body.
    pub fn body(&self) -> String {
        self.text
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(self.html.as_deref())
            .unwrap_or_default()
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
}
