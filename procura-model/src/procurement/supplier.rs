use serde::{Deserialize, Serialize};

use crate::{EntitySchema, FieldSpec, Record, SchemaRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupplierStatus {
    #[default]
    Pending,
    Active,
    Inactive,
    Blocked,
}

impl SupplierStatus {
    pub const ALL: [&'static str; 4] = ["Pending", "Active", "Inactive", "Blocked"];

    /// Whether purchase orders may be raised against the supplier.
    pub fn can_order(self) -> bool {
        self == Self::Active
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub name: String,
    #[serde(default)]
    pub contact_person: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: SupplierStatus,
    /// 0.0 to 5.0.
    #[serde(default)]
    pub rating: f64,
}

impl Record for Supplier {}

impl SchemaRecord for Supplier {
    const ENTITY_TYPE: &'static str = "supplier";

    fn schema() -> EntitySchema {
        EntitySchema::new(Self::ENTITY_TYPE)
            .field(FieldSpec::text("name").required())
            .field(FieldSpec::text("contactPerson"))
            .field(FieldSpec::email("email").required())
            .field(FieldSpec::text("phone").searchable(false))
            .field(FieldSpec::text("category"))
            .field(FieldSpec::enumeration("status", &SupplierStatus::ALL).required())
            .field(FieldSpec::number("rating"))
    }
}
