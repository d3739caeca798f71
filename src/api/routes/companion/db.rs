//! Database queries for the companion API
use anyhow::{Error, Result, anyhow};
use rusqlite::OptionalExtension;
use tokio_rusqlite::{Connection, params};

use super::public::Companion;

/// The companion every other route acts on: the first one created.
pub async fn get_default_companion(db: &Connection) -> Result<Companion, Error> {
    let companion = db
        .call(|conn| {
            let companion = conn
                .query_row(
                    r"
                    SELECT id, name, mood, energy, happiness, level
                    FROM companion
                    ORDER BY rowid
                    LIMIT 1
                    ",
                    [],
                    |row| {
                        Ok(Companion {
                            id: row.get(0)?,
                            name: row.get(1)?,
                            mood: row.get(2)?,
                            energy: row.get(3)?,
                            happiness: row.get(4)?,
                            level: row.get(5)?,
                        })
                    },
                )
                .optional()?;
            Ok(companion)
        })
        .await?;

    companion.ok_or_else(|| anyhow!("No companion found"))
}

/// Write the mutable stats of `companion` back to the database.
pub async fn update_companion(db: &Connection, companion: Companion) -> Result<Companion, Error> {
    let updated = companion.clone();
    let rows = db
        .call(move |conn| {
            let rows = conn.execute(
                "UPDATE companion SET name = ?1, mood = ?2, energy = ?3, happiness = ?4, level = ?5 WHERE id = ?6",
                params![
                    companion.name,
                    companion.mood,
                    companion.energy,
                    companion.happiness,
                    companion.level,
                    companion.id
                ],
            )?;
            Ok(rows)
        })
        .await?;

    if rows == 0 {
        anyhow::bail!("Companion {} not found", updated.id);
    }
    Ok(updated)
}
