//! SQLite connection setup, schema and demo seed data
use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rusqlite::params;
use tokio_rusqlite::Connection;
use uuid::Uuid;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS companion (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    mood TEXT NOT NULL DEFAULT 'Happy',
    energy INTEGER NOT NULL DEFAULT 85,
    happiness INTEGER NOT NULL DEFAULT 92,
    level INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS item (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    price INTEGER NOT NULL,
    color TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS inventory (
    id TEXT PRIMARY KEY,
    companion_id TEXT NOT NULL REFERENCES companion(id),
    item_id TEXT NOT NULL REFERENCES item(id),
    quantity INTEGER NOT NULL DEFAULT 1,
    equipped INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS journal_entry (
    id TEXT PRIMARY KEY,
    companion_id TEXT NOT NULL REFERENCES companion(id),
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    mood TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS message (
    id TEXT PRIMARY KEY,
    companion_id TEXT NOT NULL REFERENCES companion(id),
    conversation_with TEXT NOT NULL,
    sender_name TEXT NOT NULL,
    text TEXT NOT NULL,
    is_own INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS search_history (
    id TEXT PRIMARY KEY,
    query TEXT NOT NULL,
    answer TEXT NOT NULL,
    documents TEXT,
    created_at TEXT NOT NULL
);
"#;

const STORE_ITEMS: [(&str, i64, &str, &str); 6] = [
    ("Rainbow Ball", 150, "Toys", "bg-gradient-to-br from-red-400 to-purple-400"),
    ("Cozy Bed", 300, "Furniture", "bg-gradient-to-br from-blue-400 to-cyan-400"),
    ("Party Hat", 100, "Accessories", "bg-gradient-to-br from-yellow-400 to-orange-400"),
    ("Training Guide", 200, "Books", "bg-gradient-to-br from-green-400 to-emerald-400"),
    ("Friendship Bracelet", 120, "Accessories", "bg-gradient-to-br from-pink-400 to-rose-400"),
    ("Energy Drink", 80, "Consumables", "bg-gradient-to-br from-purple-400 to-indigo-400"),
];

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn seed_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Open the database at `path` with foreign key enforcement turned on.
pub async fn async_db(path: &str) -> Result<Connection> {
    let db = Connection::open(path).await?;
    enable_foreign_keys(&db).await?;
    Ok(db)
}

/// Open a throwaway in-memory database for tests.
pub async fn memory_db() -> Result<Connection> {
    let db = Connection::open_in_memory().await?;
    enable_foreign_keys(&db).await?;
    Ok(db)
}

async fn enable_foreign_keys(db: &Connection) -> Result<()> {
    db.call(|conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(())
    })
    .await?;
    Ok(())
}

/// Create all tables and seed the demo companion if the database is
/// empty. Safe to run more than once.
pub fn initialize_db(conn: &mut rusqlite::Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA)?;

    let companions: i64 = conn.query_row("SELECT COUNT(*) FROM companion", [], |row| row.get(0))?;
    if companions == 0 {
        seed_db(conn)?;
    }
    Ok(())
}

fn seed_db(conn: &mut rusqlite::Connection) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    let companion_id = new_id();

    tx.execute(
        "INSERT INTO companion (id, name, mood, energy, happiness, level) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![companion_id, "Buddy", "Happy", 85, 92, 12],
    )?;

    let mut item_ids = Vec::with_capacity(STORE_ITEMS.len());
    for (name, price, category, color) in STORE_ITEMS {
        let id = new_id();
        tx.execute(
            "INSERT INTO item (id, name, category, price, color) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, name, category, price, color],
        )?;
        item_ids.push(id);
    }

    // (item index, quantity, equipped)
    for (idx, quantity, equipped) in [(0, 2, 1), (1, 1, 1), (2, 3, 0)] {
        tx.execute(
            "INSERT INTO inventory (id, companion_id, item_id, quantity, equipped) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![new_id(), companion_id, item_ids[idx], quantity, equipped],
        )?;
    }

    let journal: [(&str, &str, &str, DateTime<Utc>); 2] = [
        (
            "A wonderful day at the park",
            "Today Buddy and I went to the park. We met Luna and had so much fun playing together...",
            "Happy",
            seed_date(2025, 11, 1),
        ),
        (
            "Halloween adventures",
            "What a fun Halloween! Buddy dressed up and we went trick-or-treating with friends...",
            "Excited",
            seed_date(2025, 10, 31),
        ),
    ];
    for (title, content, mood, created_at) in journal {
        tx.execute(
            "INSERT INTO journal_entry (id, companion_id, title, content, mood, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![new_id(), companion_id, title, content, mood, created_at],
        )?;
    }

    let messages = [
        ("Luna", "Hey Buddy! How are you today?", 0),
        ("Buddy", "I'm doing great! Just finished training.", 1),
        ("Luna", "Let's play together!", 0),
    ];
    let start = Utc::now() - Duration::seconds(messages.len() as i64);
    for (offset, (sender_name, text, is_own)) in messages.into_iter().enumerate() {
        let created_at = start + Duration::seconds(offset as i64);
        tx.execute(
            "INSERT INTO message (id, companion_id, conversation_with, sender_name, text, is_own, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![new_id(), companion_id, "Luna", sender_name, text, is_own, created_at],
        )?;
    }

    tx.commit()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn count(db: &Connection, table: &'static str) -> i64 {
        db.call(move |conn| {
            let n = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
            Ok(n)
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn it_seeds_an_empty_database() {
        let db = memory_db().await.unwrap();
        db.call(|conn| Ok(initialize_db(conn)?)).await.unwrap();

        assert_eq!(count(&db, "companion").await, 1);
        assert_eq!(count(&db, "item").await, 6);
        assert_eq!(count(&db, "inventory").await, 3);
        assert_eq!(count(&db, "journal_entry").await, 2);
        assert_eq!(count(&db, "message").await, 3);
        assert_eq!(count(&db, "search_history").await, 0);
    }

    #[tokio::test]
    async fn it_does_not_reseed_on_a_second_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db");
        let path = path.to_str().unwrap();

        let db = async_db(path).await.unwrap();
        db.call(|conn| Ok(initialize_db(conn)?)).await.unwrap();
        drop(db);

        let db = async_db(path).await.unwrap();
        db.call(|conn| Ok(initialize_db(conn)?)).await.unwrap();
        assert_eq!(count(&db, "companion").await, 1);
        assert_eq!(count(&db, "item").await, 6);
    }

    #[tokio::test]
    async fn it_enforces_foreign_keys() {
        let db = memory_db().await.unwrap();
        db.call(|conn| Ok(initialize_db(conn)?)).await.unwrap();

        let result = db
            .call(|conn| {
                conn.execute(
                    "INSERT INTO inventory (id, companion_id, item_id) VALUES ('x', 'nope', 'nope')",
                    [],
                )?;
                Ok(())
            })
            .await;
        assert!(result.is_err());
    }
}
