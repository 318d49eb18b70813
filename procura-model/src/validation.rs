//! Required-field checks run by callers before handing data to a store.
//!
//! The store never calls these; it accepts whatever it is given.

use serde::Serialize;
use serde_json::Value;

/// Outcome of a required-field check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    /// One `"<field> is required"` message per missing field, in the order
    /// the required fields were given.
    pub errors: Vec<String>,
}

/// Whether a value counts as "present".
///
/// Null, `false`, zero, NaN and the empty string are absent; arrays and
/// objects are always present, even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Checks that every field in `required` is present on `candidate`.
///
/// A candidate that does not serialize to an object has no fields, so every
/// required field is reported missing.
pub fn validate_required<T, S>(candidate: &T, required: &[S]) -> ValidationReport
where
    T: Serialize + ?Sized,
    S: AsRef<str>,
{
    let value = serde_json::to_value(candidate).unwrap_or(Value::Null);

    let errors: Vec<String> = required
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|field| !value.get(field).is_some_and(is_truthy))
        .map(|field| format!("{field} is required"))
        .collect();

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}
