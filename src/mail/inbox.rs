//! Cross-inbox views over the mailbox provider and ingestion of the
//! resulting emails into the memory store.
//!
//! Every inbox and every message is fetched in its own task. A failing
//! unit is logged and left out (or degraded, for message bodies)
//! without affecting its siblings. Nothing is retried.
use std::cmp::Reverse;
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use super::metadata::{self, EmailMetadata};
use super::narrative::build_narrative;
use crate::agentmail::{MailboxProvider, MessageSummary, Thread};
use crate::hyperspell::{MemoryStore, MemoryTag, NewMemory};

pub const THREAD_PAGE_SIZE: usize = 50;
pub const MESSAGE_PAGE_SIZE: usize = 100;

const NO_SUBJECT: &str = "(No subject)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub from: String,
    pub last_subject: String,
    pub last_received_at: Option<DateTime<Utc>>,
    pub unread_count: u32,
    pub thread_id: String,
    pub inbox_id: String,
}

impl ConversationSummary {
    fn from_thread(inbox_id: &str, thread: Thread) -> Self {
        Self {
            from: thread
                .senders
                .into_iter()
                .next()
                .unwrap_or_else(|| String::from("Unknown")),
            last_subject: thread
                .subject
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| NO_SUBJECT.to_string()),
            last_received_at: thread.received_timestamp.or(thread.timestamp),
            unread_count: 0,
            thread_id: thread.thread_id,
            inbox_id: inbox_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEmail {
    pub id: String,
    pub from: String,
    pub subject: String,
    pub text: String,
    pub received_at: Option<DateTime<Utc>>,
    pub metadata: EmailMetadata,
}

impl NormalizedEmail {
    /// Build from a listing entry and its body. An empty body yields
    /// empty metadata.
    fn new(summary: &MessageSummary, text: String) -> Self {
        let metadata = metadata::decode(&text);
        Self {
            id: summary.message_id.clone(),
            from: summary.sender().to_string(),
            subject: summary
                .subject
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| NO_SUBJECT.to_string()),
            text,
            received_at: summary.received_at(),
            metadata,
        }
    }

    pub fn memory_tag(&self) -> MemoryTag {
        MemoryTag {
            email_id: self.id.clone(),
            from: self.from.clone(),
            subject: self.subject.clone(),
        }
    }

    pub fn narrative(&self) -> String {
        build_narrative(
            &self.from,
            &self.text,
            self.received_at.unwrap_or_else(Utc::now),
            &self.metadata,
        )
    }
}

/// All threads across every inbox, newest first.
pub async fn list_conversations(
    provider: Arc<dyn MailboxProvider>,
) -> Result<Vec<ConversationSummary>> {
    let inboxes = provider.list_inboxes().await?;
    tracing::debug!("Fetching threads for {} inboxes", inboxes.len());

    let mut tasks = JoinSet::new();
    for inbox in inboxes {
        let provider = Arc::clone(&provider);
        tasks.spawn(async move {
            let result = provider
                .list_threads(&inbox.inbox_id, THREAD_PAGE_SIZE)
                .await;
            (inbox.inbox_id, result)
        });
    }

    let mut conversations = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((inbox_id, Ok(threads))) => {
                tracing::debug!("Got {} threads from {}", threads.len(), inbox_id);
                conversations.extend(
                    threads
                        .into_iter()
                        .map(|t| ConversationSummary::from_thread(&inbox_id, t)),
                );
            }
            Ok((inbox_id, Err(e))) => {
                tracing::error!("Failed to fetch threads from inbox {}: {}", inbox_id, e);
            }
            Err(e) => tracing::error!("Thread fetch task failed: {}", e),
        }
    }

    conversations.sort_by_key(|c| Reverse(c.last_received_at));
    Ok(conversations)
}

/// Messages across every inbox with their bodies and decoded metadata,
/// oldest first. `from` keeps only senders containing the substring.
pub async fn list_emails(
    provider: Arc<dyn MailboxProvider>,
    from: Option<&str>,
) -> Result<Vec<NormalizedEmail>> {
    let inboxes = provider.list_inboxes().await?;

    let mut listings = JoinSet::new();
    for inbox in inboxes {
        let provider = Arc::clone(&provider);
        listings.spawn(async move {
            let result = provider
                .list_messages(&inbox.inbox_id, MESSAGE_PAGE_SIZE)
                .await;
            (inbox.inbox_id, result)
        });
    }

    let mut matching: Vec<(String, MessageSummary)> = Vec::new();
    while let Some(joined) = listings.join_next().await {
        match joined {
            Ok((inbox_id, Ok(messages))) => {
                tracing::debug!("Got {} messages from {}", messages.len(), inbox_id);
                matching.extend(
                    messages
                        .into_iter()
                        .filter(|m| from.is_none_or(|f| m.sender().contains(f)))
                        .map(|m| (inbox_id.clone(), m)),
                );
            }
            Ok((inbox_id, Err(e))) => {
                tracing::error!("Failed to fetch messages from inbox {}: {}", inbox_id, e);
            }
            Err(e) => tracing::error!("Message listing task failed: {}", e),
        }
    }

    tracing::debug!("Fetching bodies for {} messages", matching.len());
    let mut bodies = JoinSet::new();
    for (inbox_id, summary) in matching {
        let provider = Arc::clone(&provider);
        bodies.spawn(async move {
            let text = match provider.get_message(&inbox_id, &summary.message_id).await {
                Ok(message) => message.body(),
                Err(e) => {
                    tracing::error!("Failed to fetch message {}: {}", summary.message_id, e);
                    String::new()
                }
            };
            NormalizedEmail::new(&summary, text)
        });
    }

    let mut emails = Vec::new();
    while let Some(joined) = bodies.join_next().await {
        match joined {
            Ok(email) => emails.push(email),
            Err(e) => tracing::error!("Message body task failed: {}", e),
        }
    }

    emails.sort_by_key(|e| e.received_at);
    Ok(emails)
}

/// Store one email's narrative in the memory store.
pub async fn ingest_email(store: &dyn MemoryStore, email: &NormalizedEmail) -> Result<()> {
    let memory = NewMemory::email(email.narrative(), email.memory_tag());
    let resp = store.add_memory(&memory).await?;
    tracing::info!(
        "Stored email {} in memory: {}",
        email.id,
        resp.resource_id.as_deref().unwrap_or("success")
    );
    Ok(())
}

/// Store every email, one call each. Failures are logged and skipped.
/// Returns the number of emails stored.
pub async fn ingest_emails(store: Arc<dyn MemoryStore>, emails: &[NormalizedEmail]) -> usize {
    let mut tasks = JoinSet::new();
    for email in emails.iter().cloned() {
        let store = Arc::clone(&store);
        tasks.spawn(async move {
            let result = ingest_email(store.as_ref(), &email).await;
            (email.id, result)
        });
    }

    let mut stored = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((_, Ok(()))) => stored += 1,
            Ok((email_id, Err(e))) => {
                tracing::error!("Failed to store email {} in memory: {}", email_id, e);
            }
            Err(e) => tracing::error!("Memory ingestion task failed: {}", e),
        }
    }
    stored
}
