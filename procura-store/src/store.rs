//! The per-entity-type store.

use procura_model::{Document, Entity, EntitySchema, Record, SchemaRecord, strip_reserved};
use procura_types::EntityId;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::codec::{self, ExportFormat};
use crate::error::{StoreError, StoreResult};
use crate::filter::{Filters, contains_ignore_case};
use crate::outcome::ImportOutcome;

/// Keyed collection of entities of one type.
///
/// Iteration (`iter`, `list`, `search`, `export`) follows insertion order.
#[derive(Debug, Clone)]
pub struct EntityStore<T> {
    entity_type: String,
    schema: Option<EntitySchema>,
    entities: HashMap<EntityId, Entity<T>>,
    order: Vec<EntityId>,
}

impl<T: SchemaRecord> EntityStore<T> {
    /// Store for a typed record, named and described by its schema.
    pub fn for_schema() -> Self {
        Self::with_schema(T::schema())
    }
}

impl<T: Record> EntityStore<T> {
    /// Creates an empty store; `entity_type` namespaces generated ids.
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            schema: None,
            entities: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Creates an empty store named after `schema.entity_type`.
    pub fn with_schema(schema: EntitySchema) -> Self {
        let mut store = Self::new(schema.entity_type.clone());
        store.schema = Some(schema);
        store
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn schema(&self) -> Option<&EntitySchema> {
        self.schema.as_ref()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity<T>> {
        self.order.iter().filter_map(|id| self.entities.get(id))
    }

    /// Removes every entity.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.order.clear();
    }

    // ── CRUD ─────────────────────────────────────────────────────

    /// Stores `data` under a fresh id with `created == updated == now`.
    ///
    /// No validation happens here; see `procura_model::validate_required`.
    pub fn create(&mut self, data: T) -> Entity<T> {
        let entity = Entity::new(&self.entity_type, data);
        debug!(entity_type = %self.entity_type, id = %entity.id, "Entity created");
        self.order.push(entity.id.clone());
        self.entities.insert(entity.id.clone(), entity.clone());
        entity
    }

    pub fn read<Q: AsRef<str> + ?Sized>(&self, id: &Q) -> Option<&Entity<T>> {
        self.entities.get(id.as_ref())
    }

    /// Shallow-merges `patch` onto the stored record and refreshes `updated`.
    ///
    /// `id`, `created` and `updated` in the patch are ignored. Returns
    /// `Ok(None)` when the id is unknown. For typed records the merged
    /// object must still deserialize; if it does not, the entity is left
    /// untouched and `StoreError::Patch` is returned.
    pub fn update<Q: AsRef<str> + ?Sized>(
        &mut self,
        id: &Q,
        mut patch: Document,
    ) -> StoreResult<Option<Entity<T>>> {
        let Some(entity) = self.entities.get_mut(id.as_ref()) else {
            return Ok(None);
        };

        strip_reserved(&mut patch);
        let mut merged = entity.data_document()?;
        merged.extend(patch);

        entity.data = serde_json::from_value(Value::Object(merged)).map_err(|source| {
            StoreError::Patch {
                id: entity.id.to_string(),
                source,
            }
        })?;
        entity.touch();

        debug!(entity_type = %self.entity_type, id = %entity.id, "Entity updated");
        Ok(Some(entity.clone()))
    }

    /// Typed counterpart of [`update`](Self::update): edits the record in
    /// place and refreshes `updated`. Reserved fields the closure adds to a
    /// `Document` record are dropped.
    pub fn modify<Q, F>(&mut self, id: &Q, f: F) -> Option<Entity<T>>
    where
        Q: AsRef<str> + ?Sized,
        F: FnOnce(&mut T),
    {
        let entity = self.entities.get_mut(id.as_ref())?;
        f(&mut entity.data);
        entity.data.clear_reserved();
        entity.touch();
        debug!(entity_type = %self.entity_type, id = %entity.id, "Entity modified");
        Some(entity.clone())
    }

    /// Returns whether an entity was removed.
    pub fn delete<Q: AsRef<str> + ?Sized>(&mut self, id: &Q) -> bool {
        let id = id.as_ref();
        if self.entities.remove(id).is_none() {
            return false;
        }
        self.order.retain(|known| known.as_str() != id);
        debug!(entity_type = %self.entity_type, id = %id, "Entity deleted");
        true
    }

    // ── Queries ──────────────────────────────────────────────────

    /// Entities matching every entry of `filters`.
    pub fn list(&self, filters: &Filters) -> Vec<&Entity<T>> {
        if filters.is_empty() {
            return self.iter().collect();
        }
        self.iter()
            .filter(|entity| {
                entity
                    .to_document()
                    .is_ok_and(|document| filters.matches(&document))
            })
            .collect()
    }

    /// Entities where any of `fields` contains `query`, ignoring case.
    ///
    /// An empty or whitespace-only query returns everything.
    pub fn search<S: AsRef<str>>(&self, query: &str, fields: &[S]) -> Vec<&Entity<T>> {
        if query.trim().is_empty() {
            return self.iter().collect();
        }
        let needle = query.to_lowercase();
        self.iter()
            .filter(|entity| {
                entity.to_document().is_ok_and(|document| {
                    fields.iter().any(|field| {
                        document
                            .get(field.as_ref())
                            .is_some_and(|v| contains_ignore_case(v, &needle))
                    })
                })
            })
            .collect()
    }

    /// [`search`](Self::search) over the schema's searchable fields, or over
    /// every record field when the store has no schema.
    pub fn search_indexed(&self, query: &str) -> Vec<&Entity<T>> {
        if let Some(schema) = &self.schema {
            return self.search(query, &schema.search_fields());
        }
        if query.trim().is_empty() {
            return self.iter().collect();
        }
        let needle = query.to_lowercase();
        self.iter()
            .filter(|entity| {
                entity.data_document().is_ok_and(|document| {
                    document.values().any(|v| contains_ignore_case(v, &needle))
                })
            })
            .collect()
    }

    // ── Exchange ─────────────────────────────────────────────────

    /// Serializes the whole collection.
    ///
    /// CSV of an empty store is the empty string.
    pub fn export(&self, format: ExportFormat) -> StoreResult<String> {
        let entities: Vec<&Entity<T>> = self.iter().collect();
        match format {
            ExportFormat::Json => codec::encode_json(&entities),
            ExportFormat::Csv => {
                let documents = entities
                    .iter()
                    .map(|e| e.to_document())
                    .collect::<Result<Vec<_>, _>>()?;
                codec::encode_csv(&documents)
            }
        }
    }

    /// Creates one new entity per decoded record.
    ///
    /// Incoming `id` / `created` / `updated` values are discarded, so
    /// re-importing an export yields independent copies. The payload is
    /// decoded in full before anything is created: on failure the store is
    /// unchanged and the outcome is `Failed`.
    pub fn import(&mut self, data: &str, format: ExportFormat) -> ImportOutcome<T> {
        let records = match self.decode(data, format) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    entity_type = %self.entity_type,
                    %format,
                    error = %e,
                    "Import failed, no entities created"
                );
                return ImportOutcome::Failed(e);
            }
        };

        let created: Vec<Entity<T>> = records.into_iter().map(|r| self.create(r)).collect();
        debug!(
            entity_type = %self.entity_type,
            %format,
            count = created.len(),
            "Import complete"
        );
        ImportOutcome::Imported(created)
    }

    fn decode(&self, data: &str, format: ExportFormat) -> StoreResult<Vec<T>> {
        let documents = match format {
            ExportFormat::Json => codec::decode_json(data)?,
            ExportFormat::Csv => codec::decode_csv(data)?,
        };
        documents
            .into_iter()
            .map(|mut document| {
                strip_reserved(&mut document);
                serde_json::from_value(Value::Object(document)).map_err(StoreError::from)
            })
            .collect()
    }
}
