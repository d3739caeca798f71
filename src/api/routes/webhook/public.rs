//! Public types for the webhook API
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agentmail::Sender;
use crate::agentmail::models::lenient_timestamp;
use crate::mail::{NormalizedEmail, metadata};

pub const MESSAGE_RECEIVED: &str = "message.received";

/// Event delivered by the mailbox provider
#[derive(Debug, Default, Deserialize)]
pub struct MailboxEvent {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub message: Option<EventMessage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventMessage {
    #[serde(default, alias = "messageId")]
    pub message_id: Option<String>,
    #[serde(default)]
    pub from: Option<Sender>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(
        default,
        alias = "receivedTimestamp",
        deserialize_with = "lenient_timestamp"
    )]
    pub received_timestamp: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl EventMessage {
    /// Normalize the pushed message the same way listed emails are.
    /// Missing senders become `Unknown`.
    pub fn into_email(self) -> NormalizedEmail {
        let text = self
            .text
            .filter(|t| !t.is_empty())
            .or(self.html)
            .unwrap_or_default();
        let from = self
            .from
            .as_ref()
            .map(Sender::address)
            .filter(|f| !f.is_empty())
            .unwrap_or("Unknown")
            .to_string();

        NormalizedEmail {
            id: self.message_id.unwrap_or_default(),
            from,
            subject: self
                .subject
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| String::from("(No subject)")),
            metadata: metadata::decode(&text),
            text,
            received_at: self.received_timestamp.or(self.timestamp),
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct WebhookAck {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WebhookAck {
    pub fn received() -> Self {
        Self {
            success: true,
            received: Some(true),
            error: None,
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            received: None,
            error: Some(String::from("Processing failed")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_normalizes_pushed_messages() {
        let event: MailboxEvent = serde_json::from_str(
            r#"{
                "event": "message.received",
                "message": {
                    "message_id": "m1",
                    "from": {"address": "Joy <joy@example.com>"},
                    "html": "<p>hi</p>",
                    "timestamp": "2025-11-01T10:00:00Z"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(event.event.as_deref(), Some(MESSAGE_RECEIVED));

        let email = event.message.unwrap().into_email();
        assert_eq!(email.id, "m1");
        assert_eq!(email.from, "Joy <joy@example.com>");
        assert_eq!(email.subject, "(No subject)");
        assert_eq!(email.text, "<p>hi</p>");
        assert!(email.metadata.is_empty());
        assert!(email.received_at.is_some());
    }

    #[test]
    fn it_keeps_events_with_odd_timestamps() {
        let event: MailboxEvent = serde_json::from_str(
            r#"{
                "event": "message.received",
                "message": {"message_id": "m1", "text": "hi", "timestamp": "2025-11-01 10:00:00", "receivedTimestamp": "whenever"}
            }"#,
        )
        .unwrap();
        let email = event.message.unwrap().into_email();
        assert_eq!(email.id, "m1");
        assert_eq!(
            email.received_at.unwrap().to_rfc3339(),
            "2025-11-01T10:00:00+00:00"
        );
    }

    #[test]
    fn it_defaults_missing_sender() {
        let email = EventMessage::default().into_email();
        assert_eq!(email.from, "Unknown");
        assert_eq!(email.text, "");
        assert!(email.received_at.is_none());
    }
}
