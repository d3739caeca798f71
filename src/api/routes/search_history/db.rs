//! Database queries for the search history API
use anyhow::{Error, Result};
use chrono::Utc;
use tokio_rusqlite::{Connection, params};
use uuid::Uuid;

use super::public::SearchHistoryEntry;

pub async fn insert_search(
    db: &Connection,
    query: String,
    answer: String,
    documents: Option<String>,
) -> Result<SearchHistoryEntry, Error> {
    let entry = SearchHistoryEntry {
        id: Uuid::new_v4().to_string(),
        query,
        answer,
        documents,
        created_at: Utc::now(),
    };
    let inserted = entry.clone();
    db.call(move |conn| {
        conn.execute(
            "INSERT INTO search_history (id, query, answer, documents, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![entry.id, entry.query, entry.answer, entry.documents, entry.created_at],
        )?;
        Ok(())
    })
    .await?;
    Ok(inserted)
}

/// Most recent searches first.
pub async fn list_searches(db: &Connection, limit: usize) -> Result<Vec<SearchHistoryEntry>, Error> {
    let entries = db
        .call(move |conn| {
            let mut stmt = conn.prepare(
                r"
                SELECT id, query, answer, documents, created_at
                FROM search_history
                ORDER BY created_at DESC, rowid DESC
                LIMIT ?1
                ",
            )?;
            let entries = stmt
                .query_map([limit as i64], |row| {
                    Ok(SearchHistoryEntry {
                        id: row.get(0)?,
                        query: row.get(1)?,
                        answer: row.get(2)?,
                        documents: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                })?
                .filter_map(Result::ok)
                .collect::<Vec<_>>();
            Ok(entries)
        })
        .await?;
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::db::{initialize_db, memory_db};

    #[tokio::test]
    async fn it_lists_newest_first() {
        let db = memory_db().await.unwrap();
        db.call(|conn| Ok(initialize_db(conn)?)).await.unwrap();

        for query in ["first", "second", "third"] {
            insert_search(&db, query.to_string(), String::from("answer"), None)
                .await
                .unwrap();
        }

        let entries = list_searches(&db, 2).await.unwrap();
        let queries: Vec<_> = entries.iter().map(|e| e.query.as_str()).collect();
        assert_eq!(queries, vec!["third", "second"]);
    }
}
