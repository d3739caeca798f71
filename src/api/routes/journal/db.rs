//! Database queries for the journal API
use anyhow::{Error, Result};
use chrono::Utc;
use tokio_rusqlite::{Connection, params};
use uuid::Uuid;

use super::public::{JournalEntry, NewJournalEntry};

/// Journal entries for a companion, newest first.
pub async fn list_entries(db: &Connection, companion_id: String) -> Result<Vec<JournalEntry>, Error> {
    let entries = db
        .call(move |conn| {
            let mut stmt = conn.prepare(
                r"
                SELECT id, companion_id, title, content, mood, created_at
                FROM journal_entry
                WHERE companion_id = ?1
                ORDER BY created_at DESC
                ",
            )?;
            let entries = stmt
                .query_map([companion_id], |row| {
                    Ok(JournalEntry {
                        id: row.get(0)?,
                        companion_id: row.get(1)?,
                        title: row.get(2)?,
                        content: row.get(3)?,
                        mood: row.get(4)?,
                        created_at: row.get(5)?,
                    })
                })?
                .filter_map(Result::ok)
                .collect::<Vec<_>>();
            Ok(entries)
        })
        .await?;
    Ok(entries)
}

pub async fn insert_entry(
    db: &Connection,
    companion_id: String,
    entry: NewJournalEntry,
) -> Result<JournalEntry, Error> {
    let entry = JournalEntry {
        id: Uuid::new_v4().to_string(),
        companion_id,
        title: entry.title,
        content: entry.content,
        mood: entry.mood,
        created_at: Utc::now(),
    };
    let inserted = entry.clone();
    db.call(move |conn| {
        conn.execute(
            "INSERT INTO journal_entry (id, companion_id, title, content, mood, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entry.id,
                entry.companion_id,
                entry.title,
                entry.content,
                entry.mood,
                entry.created_at
            ],
        )?;
        Ok(())
    })
    .await?;
    Ok(inserted)
}
