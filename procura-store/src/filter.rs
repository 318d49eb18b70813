use procura_model::Document;
use serde_json::Value;

use crate::codec::display_value;

/// Field constraints for [`crate::EntityStore::list`]. All entries must match.
///
/// - null or empty-string values are ignored
/// - string values match case-insensitively as substrings of the field's
///   display text
/// - any other value must equal the field exactly (numbers compare by value)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    entries: Vec<(String, Value)>,
}

impl Filters {
    /// No constraints: every entity matches.
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.entries.push((field.into(), value.into()));
    }

    /// True when no entry constrains anything.
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, v)| is_wildcard(v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.entries
            .iter()
            .all(|(field, expected)| entry_matches(document.get(field), expected))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Filters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filters = Self::none();
        for (k, v) in iter {
            filters.insert(k, v);
        }
        filters
    }
}

fn is_wildcard(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn entry_matches(actual: Option<&Value>, expected: &Value) -> bool {
    if is_wildcard(expected) {
        return true;
    }
    match expected {
        Value::String(needle) => {
            actual.is_some_and(|v| contains_ignore_case(v, &needle.to_lowercase()))
        }
        _ => actual.is_some_and(|v| values_equal(v, expected)),
    }
}

/// Whether the display text of `value` contains `needle_lower`, which must
/// already be lower-cased.
pub(crate) fn contains_ignore_case(value: &Value, needle_lower: &str) -> bool {
    display_value(value).to_lowercase().contains(needle_lower)
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn wildcards_are_ignored() {
        let filters = Filters::none().with("status", "").with("rating", Value::Null);
        assert!(filters.is_empty());
        assert!(filters.matches(&doc(json!({"status": "Active"}))));
    }

    #[test]
    fn string_filter_is_substring_case_insensitive() {
        let filters = Filters::none().with("name", "TECH");
        assert!(filters.matches(&doc(json!({"name": "Nortech Supplies"}))));
        assert!(!filters.matches(&doc(json!({"name": "Acme"}))));
        assert!(!filters.matches(&doc(json!({}))));
    }

    #[test]
    fn string_filter_matches_stringified_numbers() {
        let filters = Filters::none().with("rating", "4");
        assert!(filters.matches(&doc(json!({"rating": 4.5}))));

        let whole = Filters::none().with("rating", "5");
        assert!(whole.matches(&doc(json!({"rating": 5.0}))));
        assert!(!Filters::none().with("rating", ".0").matches(&doc(json!({"rating": 5.0}))));
    }

    #[test]
    fn non_string_filter_is_exact() {
        let filters = Filters::none().with("rating", 5);
        assert!(filters.matches(&doc(json!({"rating": 5.0}))));
        assert!(!filters.matches(&doc(json!({"rating": 4}))));
        assert!(!filters.matches(&doc(json!({"rating": "5"}))));

        let flag = Filters::none().with("active", true);
        assert!(flag.matches(&doc(json!({"active": true}))));
        assert!(!flag.matches(&doc(json!({"active": false}))));
    }

    #[test]
    fn all_entries_must_match() {
        let filters: Filters = [("status", json!("active")), ("category", json!("steel"))]
            .into_iter()
            .collect();
        assert!(filters.matches(&doc(json!({"status": "Active", "category": "Steel"}))));
        assert!(!filters.matches(&doc(json!({"status": "Active", "category": "Paper"}))));
    }
}
