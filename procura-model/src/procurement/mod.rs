//! Typed records behind the procurement screens.
//!
//! Every record serializes with camelCase field names, matching the column
//! names the screens and CSV exports use.

mod delivery;
mod inventory;
mod orders;
mod planning;
mod supplier;

pub use delivery::{Delivery, DeliveryDirection, DeliveryStatus};
pub use inventory::{Batch, ExpiryStatus, InventoryItem, ReorderStatus};
pub use orders::{OrderStatus, PurchaseOrder};
pub use planning::{DemandForecast, VmiAgreement};
pub use supplier::{Supplier, SupplierStatus};

/// Default look-ahead for [`Batch::expiry_status`], in days.
pub const DEFAULT_EXPIRY_WINDOW_DAYS: u32 = 30;

use crate::{EntitySchema, SchemaRecord};

/// Built-in schema for a known entity-type name.
pub fn schema_for(entity_type: &str) -> Option<EntitySchema> {
    let schema = match entity_type {
        Supplier::ENTITY_TYPE => Supplier::schema(),
        PurchaseOrder::ENTITY_TYPE => PurchaseOrder::schema(),
        Delivery::ENTITY_TYPE => Delivery::schema(),
        InventoryItem::ENTITY_TYPE => InventoryItem::schema(),
        Batch::ENTITY_TYPE => Batch::schema(),
        VmiAgreement::ENTITY_TYPE => VmiAgreement::schema(),
        DemandForecast::ENTITY_TYPE => DemandForecast::schema(),
        _ => return None,
    };
    Some(schema)
}
