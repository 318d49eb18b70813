use procura_types::EntityId;
use proptest::prelude::*;
use std::collections::HashSet;
use std::str::FromStr;

// ── Generation ────────────────────────────────────────────────────

#[test]
fn generated_id_is_prefixed_with_entity_type() {
    let id = EntityId::generate("supplier");
    assert!(id.as_str().starts_with("supplier-"));
    assert_eq!(id.entity_type(), "supplier");
}

#[test]
fn generated_id_carries_millis() {
    let id = EntityId::with_millis("delivery", 1_700_000_000_123);
    assert_eq!(id.millis(), Some(1_700_000_000_123));
}

#[test]
fn ids_within_same_millisecond_are_unique() {
    let ids: HashSet<EntityId> = (0..1000)
        .map(|_| EntityId::with_millis("supplier", 42))
        .collect();
    assert_eq!(ids.len(), 1000);
}

#[test]
fn entity_type_may_contain_dashes() {
    let id = EntityId::generate("purchase-order");
    assert_eq!(id.entity_type(), "purchase-order");
    assert!(id.millis().is_some());
}

// ── Parsing ───────────────────────────────────────────────────────

#[test]
fn display_and_parse_roundtrip() {
    let id = EntityId::generate("inventoryItem");
    let parsed = EntityId::parse(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn from_str_accepts_well_formed_id() {
    let id = EntityId::from_str("supplier-1700000000000-abc123xyz").unwrap();
    assert_eq!(id.entity_type(), "supplier");
}

#[test]
fn parse_rejects_missing_parts() {
    assert!(EntityId::parse("supplier").is_err());
    assert!(EntityId::parse("supplier-123").is_err());
    assert!(EntityId::parse("-123-abc").is_err());
    assert!(EntityId::parse("supplier-123-").is_err());
}

#[test]
fn parse_rejects_non_numeric_millis() {
    assert!(EntityId::parse("supplier-12x4-abcdef").is_err());
}

// ── Serde ─────────────────────────────────────────────────────────

#[test]
fn serializes_as_plain_string() {
    let id = EntityId::parse("batch-1-aaaaaaaaa").unwrap();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"batch-1-aaaaaaaaa\"");
    let back: EntityId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

// ── Properties ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn generated_ids_always_parse(entity_type in "[a-zA-Z][a-zA-Z0-9]{0,20}") {
        let id = EntityId::generate(&entity_type);
        prop_assert!(EntityId::parse(id.as_str()).is_ok());
        prop_assert_eq!(id.entity_type(), entity_type.as_str());
    }
}
