//! Database queries for the companion chat API
use anyhow::{Error, Result};
use chrono::Utc;
use tokio_rusqlite::{Connection, params};
use uuid::Uuid;

use super::public::{ChatMessage, NewChatMessage};

/// Messages for a companion in the order they were sent, optionally
/// limited to one conversation partner.
pub async fn list_messages(
    db: &Connection,
    companion_id: String,
    conversation_with: Option<String>,
) -> Result<Vec<ChatMessage>, Error> {
    let messages = db
        .call(move |conn| {
            let mut stmt = conn.prepare(
                r"
                SELECT id, companion_id, conversation_with, sender_name, text, is_own, created_at
                FROM message
                WHERE companion_id = ?1
                  AND (?2 IS NULL OR conversation_with = ?2)
                ORDER BY created_at ASC, rowid ASC
                ",
            )?;
            let messages = stmt
                .query_map(params![companion_id, conversation_with], |row| {
                    Ok(ChatMessage {
                        id: row.get(0)?,
                        companion_id: row.get(1)?,
                        conversation_with: row.get(2)?,
                        sender_name: row.get(3)?,
                        text: row.get(4)?,
                        is_own: row.get(5)?,
                        created_at: row.get(6)?,
                    })
                })?
                .filter_map(Result::ok)
                .collect::<Vec<_>>();
            Ok(messages)
        })
        .await?;
    Ok(messages)
}

pub async fn insert_message(
    db: &Connection,
    companion_id: String,
    message: NewChatMessage,
) -> Result<ChatMessage, Error> {
    let message = ChatMessage {
        id: Uuid::new_v4().to_string(),
        companion_id,
        conversation_with: message.conversation_with,
        sender_name: message.sender_name,
        text: message.text,
        is_own: message.is_own,
        created_at: Utc::now(),
    };
    let inserted = message.clone();
    db.call(move |conn| {
        conn.execute(
            "INSERT INTO message (id, companion_id, conversation_with, sender_name, text, is_own, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                message.id,
                message.companion_id,
                message.conversation_with,
                message.sender_name,
                message.text,
                message.is_own,
                message.created_at
            ],
        )?;
        Ok(())
    })
    .await?;
    Ok(inserted)
}
