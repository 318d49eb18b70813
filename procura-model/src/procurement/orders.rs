use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{EntitySchema, FieldSpec, Record, SchemaRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Draft,
    Submitted,
    Approved,
    Received,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [&'static str; 5] = ["Draft", "Submitted", "Approved", "Received", "Cancelled"];
}

/// A purchase order. `supplier` is the supplier's name as typed on the form,
/// not a reference checked against the supplier store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub order_number: String,
    pub supplier: String,
    pub order_date: NaiveDate,
    #[serde(default)]
    pub expected_delivery: Option<NaiveDate>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub status: OrderStatus,
}

impl PurchaseOrder {
    /// Still waiting on goods.
    pub fn is_open(&self) -> bool {
        matches!(
            self.status,
            OrderStatus::Draft | OrderStatus::Submitted | OrderStatus::Approved
        )
    }

    /// Open and past its expected delivery date.
    pub fn is_late(&self, today: NaiveDate) -> bool {
        self.is_open() && self.expected_delivery.is_some_and(|d| d < today)
    }
}

impl Record for PurchaseOrder {}

impl SchemaRecord for PurchaseOrder {
    const ENTITY_TYPE: &'static str = "purchaseOrder";

    fn schema() -> EntitySchema {
        EntitySchema::new(Self::ENTITY_TYPE)
            .field(FieldSpec::text("orderNumber").required())
            .field(FieldSpec::text("supplier").required())
            .field(FieldSpec::date("orderDate").required())
            .field(FieldSpec::date("expectedDelivery"))
            .field(FieldSpec::number("totalAmount"))
            .field(FieldSpec::enumeration("status", &OrderStatus::ALL))
    }
}
