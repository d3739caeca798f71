//! Database queries for the store API
use anyhow::{Error, Result};
use tokio_rusqlite::Connection;

use super::public::Item;

fn item_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        price: row.get(3)?,
        color: row.get(4)?,
    })
}

pub async fn list_items(db: &Connection) -> Result<Vec<Item>, Error> {
    let items = db
        .call(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, category, price, color FROM item ORDER BY rowid")?;
            let items = stmt
                .query_map([], item_from_row)?
                .filter_map(Result::ok)
                .collect::<Vec<Item>>();
            Ok(items)
        })
        .await?;
    Ok(items)
}
