use procura_types::{EntityId, Timestamp};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::EntitySchema;

/// Field names owned by the store. Callers can never set them.
pub const RESERVED_FIELDS: [&str; 3] = ["id", "created", "updated"];

/// An untyped record: a JSON object of field name to value.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Removes store-owned fields from a caller-supplied object.
pub fn strip_reserved(object: &mut Document) {
    for key in RESERVED_FIELDS {
        object.remove(key);
    }
}

/// Anything an entity store can hold.
///
/// Typed schema structs cannot declare the reserved field names, so the
/// default `clear_reserved` is a no-op. [`Document`] overrides it.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Drops `id` / `created` / `updated` if the record carries them.
    fn clear_reserved(&mut self) {}
}

impl Record for Document {
    fn clear_reserved(&mut self) {
        strip_reserved(self);
    }
}

/// A typed record with a fixed entity-type name and schema.
pub trait SchemaRecord: Record {
    /// Namespace used for ids and store construction (e.g. `"supplier"`).
    const ENTITY_TYPE: &'static str;

    /// Field declarations for validation and search.
    fn schema() -> EntitySchema;
}

/// A stored entity.
///
/// Serializes as a single flat object: `id`, the record's own fields, then
/// `created` and `updated`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity<T> {
    pub id: EntityId,
    #[serde(flatten)]
    pub data: T,
    pub created: Timestamp,
    pub updated: Timestamp,
}

impl<T: Record> Entity<T> {
    /// Wraps `data` with a fresh id for `entity_type`; `created == updated`.
    pub fn new(entity_type: &str, mut data: T) -> Self {
        data.clear_reserved();
        let now = Timestamp::now();
        Self {
            id: EntityId::generate(entity_type),
            data,
            created: now,
            updated: now,
        }
    }

    /// Refreshes `updated` after a mutation.
    pub fn touch(&mut self) {
        self.updated = self.updated.tick();
    }

    /// The entity as a flat JSON object, as it appears in exports.
    pub fn to_document(&self) -> serde_json::Result<Document> {
        into_object(serde_json::to_value(self)?)
    }

    /// The record's own fields, without the store-owned ones.
    pub fn data_document(&self) -> serde_json::Result<Document> {
        into_object(serde_json::to_value(&self.data)?)
    }
}

fn into_object(value: serde_json::Value) -> serde_json::Result<Document> {
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!(
            "record serialized to {other}, expected an object"
        ))),
    }
}

impl Entity<Document> {
    /// Extract a string value from `data` using a JSON pointer (e.g., "/name").
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.pointer(pointer).and_then(|v| v.as_str())
    }

    /// Extract a boolean value from `data` using a JSON pointer.
    pub fn get_bool(&self, pointer: &str) -> Option<bool> {
        self.pointer(pointer).and_then(|v| v.as_bool())
    }

    /// Extract a numeric value from `data` using a JSON pointer.
    pub fn get_number(&self, pointer: &str) -> Option<f64> {
        self.pointer(pointer).and_then(|v| v.as_f64())
    }

    fn pointer(&self, pointer: &str) -> Option<&serde_json::Value> {
        let rest = pointer.strip_prefix('/')?;
        let (head, tail) = match rest.split_once('/') {
            Some((head, tail)) => (head, Some(tail)),
            None => (rest, None),
        };
        let value = self.data.get(head)?;
        match tail {
            Some(tail) => value.pointer(&format!("/{tail}")),
            None => Some(value),
        }
    }
}
