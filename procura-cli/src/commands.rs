//! Command handlers behind the `procura` binary.
//!
//! Each handler takes already-loaded input and returns the text to print, so
//! the binary only deals with argument parsing and process exit.

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use procura_model::procurement::{Batch, InventoryItem, schema_for};
use procura_model::{Document, Entity, EntitySchema, SchemaRecord, validate_required};
use procura_store::{EntityStore, ExportFormat, Filters, display_value};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::ProcuraConfig;

/// An input file plus how to interpret it.
#[derive(Debug, Clone)]
pub struct Input {
    pub path: PathBuf,
    pub entity_type: String,
    pub format: ExportFormat,
}

impl Input {
    /// Resolves entity type and format for `path`.
    ///
    /// The entity type defaults to the file stem (`supplier.csv` →
    /// `supplier`); the format defaults to the file extension.
    pub fn resolve(
        path: &Path,
        entity_type: Option<&str>,
        format: Option<ExportFormat>,
    ) -> Result<Self> {
        let entity_type = match entity_type {
            Some(name) => name.to_string(),
            None => path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
                .ok_or_else(|| anyhow!("cannot infer entity type from {:?}", path))?,
        };
        let format = match format {
            Some(format) => format,
            None => ExportFormat::from_path(path).ok_or_else(|| {
                anyhow!("cannot infer format from {:?}, pass --format json|csv", path)
            })?,
        };
        Ok(Self {
            path: path.to_path_buf(),
            entity_type,
            format,
        })
    }

    fn read(&self) -> Result<String> {
        std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {:?}", self.path))
    }

    /// Loads the file into an untyped store, carrying the built-in schema
    /// when the entity type has one.
    pub fn load_documents(&self) -> Result<EntityStore<Document>> {
        let data = self.read()?;
        let mut store = match schema_for(&self.entity_type) {
            Some(schema) => EntityStore::with_schema(schema),
            None => EntityStore::new(self.entity_type.clone()),
        };
        let count = store
            .import(&data, self.format)
            .into_result()
            .with_context(|| format!("Failed to import {:?}", self.path))?
            .len();
        info!(entity_type = %self.entity_type, count, "Loaded {:?}", self.path);
        Ok(store)
    }

    /// Loads the file into a typed store.
    ///
    /// CSV cells are coerced to the schema's field types first, so numeric
    /// columns survive the trip through text.
    pub fn load_typed<T: SchemaRecord>(&self) -> Result<EntityStore<T>> {
        let documents = self.load_documents()?;
        let schema = T::schema();
        let mut store = EntityStore::<T>::for_schema();
        for (index, entity) in documents.iter().enumerate() {
            let record = typed_record::<T>(&schema, entity)
                .with_context(|| format!("record {} of {:?}", index + 1, self.path))?;
            store.create(record);
        }
        debug!(entity_type = T::ENTITY_TYPE, count = store.len(), "Typed load complete");
        Ok(store)
    }
}

fn typed_record<T: SchemaRecord>(schema: &EntitySchema, entity: &Entity<Document>) -> Result<T> {
    let mut document = entity.data.clone();
    schema.coerce(&mut document);
    Ok(serde_json::from_value(Value::Object(document))?)
}

// ── Filters ──────────────────────────────────────────────────────

/// Parses a `field=value` filter argument.
///
/// Numbers and booleans become exact-match filters; everything else is a
/// case-insensitive substring filter.
pub fn parse_filter(arg: &str) -> Result<(String, Value)> {
    let Some((field, raw)) = arg.split_once('=') else {
        bail!("filter {:?} is not of the form field=value", arg);
    };
    let field = field.trim();
    if field.is_empty() {
        bail!("filter {:?} has no field name", arg);
    }
    let value = match serde_json::from_str::<Value>(raw.trim()) {
        Ok(v @ (Value::Number(_) | Value::Bool(_))) => v,
        _ => Value::String(raw.to_string()),
    };
    Ok((field.to_string(), value))
}

// ── Commands ─────────────────────────────────────────────────────

pub fn list(store: &EntityStore<Document>, filters: &[String]) -> Result<String> {
    let filters = filters
        .iter()
        .map(String::as_str)
        .map(parse_filter)
        .collect::<Result<Filters>>()?;
    Ok(entity_table(&store.list(&filters)))
}

/// Free-text search. Fields come from `fields`, then the config entry for
/// the entity type, then the store's schema (or every field).
pub fn search(
    store: &EntityStore<Document>,
    config: &ProcuraConfig,
    query: &str,
    fields: &[String],
) -> String {
    let configured = config
        .entity_type(store.entity_type())
        .map(|e| e.search_fields.as_slice())
        .unwrap_or_default();
    let hits = if !fields.is_empty() {
        store.search(query, fields)
    } else if !configured.is_empty() {
        store.search(query, configured)
    } else {
        store.search_indexed(query)
    };
    entity_table(&hits)
}

/// Outcome of `validate`: the report text and whether every entity passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateSummary {
    pub report: String,
    pub invalid: usize,
}

/// Checks every entity's required fields. Fields come from `required`, then
/// the config entry for the entity type, then the built-in schema.
pub fn validate(
    store: &EntityStore<Document>,
    config: &ProcuraConfig,
    required: &[String],
) -> ValidateSummary {
    let required: Vec<String> = if !required.is_empty() {
        required.to_vec()
    } else if let Some(entry) = config
        .entity_type(store.entity_type())
        .filter(|e| !e.required_fields.is_empty())
    {
        entry.required_fields.clone()
    } else {
        store
            .schema()
            .map(|s| s.required_fields().into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    };

    let mut lines = Vec::new();
    let mut invalid = 0;
    for entity in store.iter() {
        let report = validate_required(&entity.data, &required);
        if !report.is_valid {
            invalid += 1;
            lines.push(format!("{}: {}", entity.id, report.errors.join("; ")));
        }
    }
    lines.push(format!(
        "{} of {} {} entities valid (required: {})",
        store.len() - invalid,
        store.len(),
        store.entity_type(),
        if required.is_empty() {
            "none".to_string()
        } else {
            required.join(", ")
        }
    ));
    ValidateSummary {
        report: lines.join("\n"),
        invalid,
    }
}

/// Re-encodes the collection. With `output` the result is written to disk
/// and a one-line confirmation is returned instead.
pub fn convert(
    store: &EntityStore<Document>,
    to: ExportFormat,
    output: Option<&Path>,
) -> Result<String> {
    let encoded = store.export(to).context("Failed to encode collection")?;
    let Some(output) = output else {
        return Ok(encoded);
    };
    std::fs::write(output, &encoded).with_context(|| format!("Failed to write {:?}", output))?;
    Ok(format!(
        "Wrote {} {} entities to {:?} as {}",
        store.len(),
        store.entity_type(),
        output,
        to
    ))
}

/// Reorder status for every item, lowest stock first.
pub fn inventory(store: &EntityStore<InventoryItem>) -> String {
    let mut items: Vec<&InventoryItem> = store.iter().map(|e| &e.data).collect();
    items.sort_by_key(|item| (item.reorder_status() as u8, item.quantity));

    let rows = items
        .iter()
        .map(|item| {
            vec![
                item.sku.clone(),
                item.name.clone(),
                item.quantity.to_string(),
                item.reorder_point.to_string(),
                item.reorder_status().to_string(),
                item.suggested_order_quantity().to_string(),
            ]
        })
        .collect::<Vec<_>>();
    render_table(
        &["sku", "name", "quantity", "reorderPoint", "status", "suggestedOrder"],
        &rows,
    )
}

/// Expiry status for every batch, soonest first.
pub fn expiry(store: &EntityStore<Batch>, today: NaiveDate, window_days: u32) -> String {
    let mut batches: Vec<&Batch> = store.iter().map(|e| &e.data).collect();
    batches.sort_by_key(|b| b.expiry_date);

    let rows = batches
        .iter()
        .map(|batch| {
            vec![
                batch.sku.clone(),
                batch.lot_number.clone(),
                batch.quantity.to_string(),
                batch.expiry_date.to_string(),
                batch.days_until_expiry(today).to_string(),
                batch.expiry_status(today, window_days).to_string(),
            ]
        })
        .collect::<Vec<_>>();
    render_table(
        &["sku", "lotNumber", "quantity", "expiryDate", "days", "status"],
        &rows,
    )
}

// ── Rendering ────────────────────────────────────────────────────

/// One row per entity, columns taken from the first entity's fields.
fn entity_table(entities: &[&Entity<Document>]) -> String {
    let Some(first) = entities.first() else {
        return "(no entities)".to_string();
    };
    let headers: Vec<String> = match first.to_document() {
        Ok(document) => document.keys().cloned().collect(),
        Err(_) => return "(no entities)".to_string(),
    };
    let rows = entities
        .iter()
        .filter_map(|entity| entity.to_document().ok())
        .map(|document| {
            headers
                .iter()
                .map(|h| document.get(h).map(display_value).unwrap_or_default())
                .collect()
        })
        .collect::<Vec<Vec<String>>>();
    let headers: Vec<&str> = headers.iter().map(String::as_str).collect();
    render_table(&headers, &rows)
}

/// Left-aligned, space-padded columns. Missing cells render empty.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = vec![render_line(&widths, headers.iter().copied())];
    out.extend(
        rows.iter()
            .map(|row| render_line(&widths, row.iter().map(String::as_str))),
    );
    out.join("\n")
}

fn render_line<'a>(widths: &[usize], mut cells: impl Iterator<Item = &'a str>) -> String {
    let line = widths
        .iter()
        .map(|&width| format!("{:<width$}", cells.next().unwrap_or_default()))
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}
