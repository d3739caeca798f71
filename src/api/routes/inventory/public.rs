//! Public types for the inventory API
use serde::{Deserialize, Serialize};

use crate::api::routes::store::public::Item;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub companion_id: String,
    pub item_id: String,
    pub quantity: i64,
    pub equipped: i64,
}

/// Inventory row with the store item it refers to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryEntry {
    #[serde(flatten)]
    pub inventory: InventoryItem,
    pub item: Item,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub item_id: String,
}

#[derive(Deserialize)]
pub struct EquipRequest {
    #[serde(default)]
    pub equipped: bool,
}
