use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{EntitySchema, FieldSpec, Record, SchemaRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryDirection {
    Inbound,
    Outbound,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryStatus {
    #[default]
    Scheduled,
    #[serde(rename = "In Transit")]
    InTransit,
    Delivered,
    Delayed,
    Cancelled,
}

impl DeliveryStatus {
    pub const ALL: [&'static str; 5] = ["Scheduled", "In Transit", "Delivered", "Delayed", "Cancelled"];

    pub fn is_closed(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

/// An inbound (from a supplier) or outbound (to a customer) delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub reference: String,
    pub direction: DeliveryDirection,
    /// Supplier for inbound deliveries, customer for outbound.
    pub partner: String,
    pub scheduled_date: NaiveDate,
    #[serde(default)]
    pub item_count: u32,
    #[serde(default)]
    pub status: DeliveryStatus,
}

impl Delivery {
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.status.is_closed() && self.scheduled_date < today
    }
}

impl Record for Delivery {}

impl SchemaRecord for Delivery {
    const ENTITY_TYPE: &'static str = "delivery";

    fn schema() -> EntitySchema {
        EntitySchema::new(Self::ENTITY_TYPE)
            .field(FieldSpec::text("reference").required())
            .field(FieldSpec::enumeration("direction", &["Inbound", "Outbound"]).required())
            .field(FieldSpec::text("partner").required())
            .field(FieldSpec::date("scheduledDate").required())
            .field(FieldSpec::number("itemCount"))
            .field(FieldSpec::enumeration("status", &DeliveryStatus::ALL))
    }
}
