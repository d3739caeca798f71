//! Database queries for the inventory API
use anyhow::{Error, Result};
use rusqlite::OptionalExtension;
use tokio_rusqlite::{Connection, params};
use uuid::Uuid;

use super::public::{InventoryEntry, InventoryItem};
use crate::api::routes::store::public::Item;

fn inventory_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<InventoryItem> {
    Ok(InventoryItem {
        id: row.get(0)?,
        companion_id: row.get(1)?,
        item_id: row.get(2)?,
        quantity: row.get(3)?,
        equipped: row.get(4)?,
    })
}

pub async fn list_inventory(
    db: &Connection,
    companion_id: String,
) -> Result<Vec<InventoryEntry>, Error> {
    let entries = db
        .call(move |conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT
                    inv.id, inv.companion_id, inv.item_id, inv.quantity, inv.equipped,
                    i.id, i.name, i.category, i.price, i.color
                FROM inventory inv
                JOIN item i ON i.id = inv.item_id
                WHERE inv.companion_id = ?1
                ORDER BY inv.rowid
                "#,
            )?;
            let entries = stmt
                .query_map([companion_id], |row| {
                    Ok(InventoryEntry {
                        inventory: inventory_from_row(row)?,
                        item: Item {
                            id: row.get(5)?,
                            name: row.get(6)?,
                            category: row.get(7)?,
                            price: row.get(8)?,
                            color: row.get(9)?,
                        },
                    })
                })?
                .filter_map(Result::ok)
                .collect::<Vec<_>>();
            Ok(entries)
        })
        .await?;
    Ok(entries)
}

/// Add `quantity` of an item to the companion's inventory, stacking onto
/// an existing row for the same item.
pub async fn add_to_inventory(
    db: &Connection,
    companion_id: String,
    item_id: String,
    quantity: i64,
) -> Result<InventoryItem, Error> {
    let result = db
        .call(move |conn| {
            let tx = conn.transaction()?;

            let item_exists = tx
                .query_row("SELECT 1 FROM item WHERE id = ?1", [&item_id], |_| Ok(()))
                .optional()?
                .is_some();
            if !item_exists {
                return Ok(None);
            }

            let existing = tx
                .query_row(
                    "SELECT id, companion_id, item_id, quantity, equipped FROM inventory WHERE companion_id = ?1 AND item_id = ?2",
                    params![companion_id, item_id],
                    inventory_from_row,
                )
                .optional()?;

            let row = match existing {
                Some(mut row) => {
                    row.quantity += quantity;
                    tx.execute(
                        "UPDATE inventory SET quantity = ?1 WHERE id = ?2",
                        params![row.quantity, row.id],
                    )?;
                    row
                }
                None => {
                    let row = InventoryItem {
                        id: Uuid::new_v4().to_string(),
                        companion_id,
                        item_id,
                        quantity,
                        equipped: 0,
                    };
                    tx.execute(
                        "INSERT INTO inventory (id, companion_id, item_id, quantity, equipped) VALUES (?1, ?2, ?3, ?4, ?5)",
                        params![row.id, row.companion_id, row.item_id, row.quantity, row.equipped],
                    )?;
                    row
                }
            };

            tx.commit()?;
            Ok(Some(row))
        })
        .await?;

    result.ok_or_else(|| anyhow::anyhow!("Item not found"))
}

pub async fn set_equipped(db: &Connection, id: String, equipped: bool) -> Result<InventoryItem, Error> {
    let result = db
        .call(move |conn| {
            conn.execute(
                "UPDATE inventory SET equipped = ?1 WHERE id = ?2",
                params![equipped as i64, id],
            )?;
            let row = conn
                .query_row(
                    "SELECT id, companion_id, item_id, quantity, equipped FROM inventory WHERE id = ?1",
                    [&id],
                    inventory_from_row,
                )
                .optional()?;
            Ok(row)
        })
        .await?;

    result.ok_or_else(|| anyhow::anyhow!("Inventory item not found"))
}
