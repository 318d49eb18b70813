use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{EntitySchema, FieldSpec, Record, SchemaRecord};

/// Stock position of an item relative to its reorder point and ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReorderStatus {
    #[serde(rename = "Out of Stock")]
    OutOfStock,
    Reorder,
    #[serde(rename = "In Stock")]
    InStock,
    Overstock,
}

impl fmt::Display for ReorderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OutOfStock => "Out of Stock",
            Self::Reorder => "Reorder",
            Self::InStock => "In Stock",
            Self::Overstock => "Overstock",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub reorder_point: u32,
    /// Zero means no ceiling.
    #[serde(default)]
    pub max_stock: u32,
    #[serde(default)]
    pub unit: String,
}

impl InventoryItem {
    pub fn reorder_status(&self) -> ReorderStatus {
        if self.quantity == 0 {
            ReorderStatus::OutOfStock
        } else if self.quantity <= self.reorder_point {
            ReorderStatus::Reorder
        } else if self.max_stock > 0 && self.quantity > self.max_stock {
            ReorderStatus::Overstock
        } else {
            ReorderStatus::InStock
        }
    }

    /// Quantity that brings stock back up to target once it has fallen to
    /// the reorder point. The target is `max_stock`, or twice the reorder
    /// point when no ceiling is set.
    pub fn suggested_order_quantity(&self) -> u32 {
        if self.quantity > self.reorder_point {
            return 0;
        }
        let target = if self.max_stock > 0 {
            self.max_stock
        } else {
            self.reorder_point.saturating_mul(2)
        };
        target.saturating_sub(self.quantity)
    }
}

impl Record for InventoryItem {}

impl SchemaRecord for InventoryItem {
    const ENTITY_TYPE: &'static str = "inventoryItem";

    fn schema() -> EntitySchema {
        EntitySchema::new(Self::ENTITY_TYPE)
            .field(FieldSpec::text("sku").required())
            .field(FieldSpec::text("name").required())
            .field(FieldSpec::text("location"))
            .field(FieldSpec::number("quantity"))
            .field(FieldSpec::number("reorderPoint"))
            .field(FieldSpec::number("maxStock"))
            .field(FieldSpec::text("unit").searchable(false))
    }
}

/// Where a batch stands relative to its expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpiryStatus {
    Expired,
    #[serde(rename = "Expiring Soon")]
    ExpiringSoon,
    Valid,
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Expired => "Expired",
            Self::ExpiringSoon => "Expiring Soon",
            Self::Valid => "Valid",
        })
    }
}

/// A lot of a stocked item with a shelf life.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub sku: String,
    pub lot_number: String,
    #[serde(default)]
    pub quantity: u32,
    pub expiry_date: NaiveDate,
}

impl Batch {
    /// Negative once the batch has expired.
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        (self.expiry_date - today).num_days()
    }

    /// `Expired` strictly after the expiry date; `ExpiringSoon` from
    /// `window_days` before it up to and including the day itself.
    pub fn expiry_status(&self, today: NaiveDate, window_days: u32) -> ExpiryStatus {
        let days = self.days_until_expiry(today);
        if days < 0 {
            ExpiryStatus::Expired
        } else if days <= i64::from(window_days) {
            ExpiryStatus::ExpiringSoon
        } else {
            ExpiryStatus::Valid
        }
    }
}

impl Record for Batch {}

impl SchemaRecord for Batch {
    const ENTITY_TYPE: &'static str = "batch";

    fn schema() -> EntitySchema {
        EntitySchema::new(Self::ENTITY_TYPE)
            .field(FieldSpec::text("sku").required())
            .field(FieldSpec::text("lotNumber").required())
            .field(FieldSpec::number("quantity"))
            .field(FieldSpec::date("expiryDate").required())
    }
}
