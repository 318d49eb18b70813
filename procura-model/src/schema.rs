use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Document;
use crate::validation::{ValidationReport, validate_required};

/// Describes an entity type's fields for validation and search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySchema {
    pub entity_type: String,
    pub fields: Vec<FieldSpec>,
}

impl EntitySchema {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field declaration.
    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Looks up a field declaration by name.
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of required fields, in declaration order.
    pub fn required_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Names of fields included in free-text search, in declaration order.
    pub fn search_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.searchable)
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Checks the required fields of `candidate`.
    pub fn validate<T: Serialize + ?Sized>(&self, candidate: &T) -> ValidationReport {
        validate_required(candidate, &self.required_fields())
    }

    /// Converts string cells (as read from CSV) into the declared field types.
    ///
    /// Numbers and booleans that parse are replaced in place. Empty cells of
    /// non-text fields are removed so record defaults apply. Anything that
    /// does not parse is left as it was.
    pub fn coerce(&self, document: &mut Document) {
        for field in &self.fields {
            let Some(Value::String(cell)) = document.get(&field.name) else {
                continue;
            };
            let cell = cell.trim().to_string();
            let coerced = match field.field_type {
                FieldType::Text | FieldType::Email | FieldType::Enum => continue,
                _ if cell.is_empty() => None,
                FieldType::Number => parse_number(&cell),
                FieldType::Bool => match cell.to_ascii_lowercase().as_str() {
                    "true" => Some(Value::Bool(true)),
                    "false" => Some(Value::Bool(false)),
                    _ => continue,
                },
                FieldType::Json => match serde_json::from_str(&cell) {
                    Ok(value) => Some(value),
                    Err(_) => continue,
                },
                FieldType::Date => continue,
            };
            match coerced {
                Some(value) => {
                    document.insert(field.name.clone(), value);
                }
                None if cell.is_empty() => {
                    document.remove(&field.name);
                }
                None => {}
            }
        }
    }
}

fn parse_number(cell: &str) -> Option<Value> {
    if let Ok(n) = cell.parse::<i64>() {
        return Some(Value::from(n));
    }
    cell.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
}

/// A top-level field of an entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Serialized field name (e.g., "contactPerson").
    pub name: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub searchable: bool,
    /// Allowed values. Only meaningful when `field_type` is `Enum`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FieldSpec {
    fn simple(name: &str, field_type: FieldType, searchable: bool) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            searchable,
            options: None,
        }
    }

    /// Shorthand for a searchable text field.
    pub fn text(name: &str) -> Self {
        Self::simple(name, FieldType::Text, true)
    }

    /// Shorthand for an email address field (searchable).
    pub fn email(name: &str) -> Self {
        Self::simple(name, FieldType::Email, true)
    }

    /// Shorthand for a numeric field.
    pub fn number(name: &str) -> Self {
        Self::simple(name, FieldType::Number, false)
    }

    /// Shorthand for a boolean field.
    pub fn bool(name: &str) -> Self {
        Self::simple(name, FieldType::Bool, false)
    }

    /// Shorthand for a calendar date field (`YYYY-MM-DD`).
    pub fn date(name: &str) -> Self {
        Self::simple(name, FieldType::Date, false)
    }

    /// Shorthand for a structured field (object or array) stored as JSON.
    pub fn json(name: &str) -> Self {
        Self::simple(name, FieldType::Json, false)
    }

    /// Shorthand for an enum field with fixed options.
    pub fn enumeration(name: &str, options: &[&str]) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Enum,
            required: false,
            searchable: false,
            options: Some(options.iter().map(|o| (*o).to_string()).collect()),
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }
}

/// The data type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Email,
    Number,
    Bool,
    Date,
    Enum,
    Json,
}
