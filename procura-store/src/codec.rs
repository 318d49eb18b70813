//! JSON and CSV encodings of an entity collection.
//!
//! CSV here is naive: cells are joined with commas, string cells
//! containing a comma are wrapped in double quotes, and embedded quotes are
//! never escaped. Reading splits on commas without honouring quotes and
//! strips one surrounding pair of quotes per cell. Everything read back from
//! CSV is a string.

use procura_model::Document;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{StoreError, StoreResult};

/// Serialization format for export and import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    /// Infers the format from a file extension (`.json` / `.csv`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Csv => "csv",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(StoreError::UnknownFormat(s.to_string())),
        }
    }
}

/// Renders a field value the way list cells and CSV rows show it.
///
/// Null is empty, strings are verbatim, arrays are their elements joined by
/// commas, and everything else is its JSON text. Whole-number floats drop
/// the fraction (`5.0` shows as `5`).
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => n
            .as_f64()
            .map_or_else(|| n.to_string(), |f| f.to_string()),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

fn csv_cell(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if s.contains(',') => format!("\"{s}\""),
        Some(v) => display_value(v),
        None => String::new(),
    }
}

/// Strips one surrounding pair of double quotes, if both are present.
fn unquote(cell: &str) -> &str {
    cell.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(cell)
}

pub(crate) fn encode_csv(documents: &[Document]) -> StoreResult<String> {
    let Some(first) = documents.first() else {
        return Ok(String::new());
    };
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(&headers)?;
    for doc in documents {
        writer.write_record(headers.iter().map(|h| csv_cell(doc.get(*h))))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| StoreError::InvalidData(e.to_string()))?;
    let mut text = String::from_utf8(bytes).map_err(|e| StoreError::InvalidData(e.to_string()))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// Header line plus one object per data line, mapped by position.
///
/// Blank lines are skipped, missing trailing cells become empty strings and
/// surplus cells are dropped.
pub(crate) fn decode_csv(data: &str) -> StoreResult<Vec<Document>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .quoting(false)
        .flexible(true)
        .from_reader(data.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut documents = Vec::new();
    for row in reader.records() {
        let row = row?;
        let doc: Document = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let cell = unquote(row.get(i).unwrap_or_default());
                (header.clone(), Value::String(cell.to_string()))
            })
            .collect();
        documents.push(doc);
    }
    Ok(documents)
}

pub(crate) fn encode_json<T: Serialize>(entities: &[T]) -> StoreResult<String> {
    Ok(serde_json::to_string_pretty(entities)?)
}

/// Parses an array and keeps its object elements; anything else is skipped.
pub(crate) fn decode_json(data: &str) -> StoreResult<Vec<Document>> {
    match serde_json::from_str::<Value>(data)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect()),
        Value::Null => Err(StoreError::NotAnArray("null")),
        Value::Bool(_) => Err(StoreError::NotAnArray("a boolean")),
        Value::Number(_) => Err(StoreError::NotAnArray("a number")),
        Value::String(_) => Err(StoreError::NotAnArray("a string")),
        Value::Object(_) => Err(StoreError::NotAnArray("an object")),
    }
}
