use pretty_assertions::assert_eq;
use procura_model::procurement::{InventoryItem, ReorderStatus, Supplier, SupplierStatus};
use procura_store::{Document, EntityStore, Filters, SchemaRecord, StoreError};
use serde_json::json;

fn doc(value: serde_json::Value) -> Document {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn supplier_store() -> EntityStore<Document> {
    let mut store = EntityStore::new("supplier");
    store.create(doc(json!({"name": "Acme", "status": "Active", "category": "Steel"})));
    store.create(doc(json!({"name": "Nortech Supplies", "status": "Blocked", "category": "Electronics"})));
    store.create(doc(json!({"name": "TechParts", "status": "Active", "rating": 5})));
    store
}

// ── Scenario ─────────────────────────────────────────────────────

#[test]
fn create_update_delete_lifecycle() {
    let mut store: EntityStore<Document> = EntityStore::new("supplier");

    let created = store.create(doc(json!({"name": "Acme", "status": "Active"})));
    assert!(created.id.as_str().starts_with("supplier-"));
    assert_eq!(created.created, created.updated);

    let updated = store
        .update(&created.id, doc(json!({"status": "Blocked"})))
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created, created.created);

    let read = store.read(&created.id).unwrap();
    assert_eq!(read.get_str("/status"), Some("Blocked"));
    assert_eq!(read.get_str("/name"), Some("Acme"));

    assert!(store.delete(&created.id));
    assert!(store.read(&created.id).is_none());
    assert!(!store.delete(&created.id));
}

// ── Create & read ────────────────────────────────────────────────

#[test]
fn create_then_read_returns_input_plus_bookkeeping() {
    let mut store = EntityStore::new("delivery");
    let input = doc(json!({"reference": "D-1", "items": [1, 2], "meta": {"dock": 4}}));
    let created = store.create(input.clone());
    let read = store.read(created.id.as_str()).unwrap();
    assert_eq!(read.data, input);
    assert_eq!(read.created, read.updated);
}

#[test]
fn create_ignores_caller_supplied_bookkeeping() {
    let mut store = EntityStore::new("supplier");
    let created = store.create(doc(json!({"id": "mine", "created": "then", "name": "Acme"})));
    assert_ne!(created.id.as_str(), "mine");
    assert!(!created.data.contains_key("id"));
    assert!(!created.data.contains_key("created"));
    assert!(store.read("mine").is_none());
}

#[test]
fn create_accepts_incomplete_data() {
    let mut store: EntityStore<Document> = EntityStore::new("supplier");
    let created = store.create(Document::new());
    assert!(store.read(&created.id).is_some());
}

#[test]
fn read_unknown_is_none() {
    let store: EntityStore<Document> = EntityStore::new("supplier");
    assert!(store.read("supplier-1-abcdefghi").is_none());
}

// ── Update ───────────────────────────────────────────────────────

#[test]
fn update_preserves_unpatched_fields() {
    let mut store = supplier_store();
    let id = store.iter().next().unwrap().id.clone();
    store.update(&id, doc(json!({"rating": 3}))).unwrap();
    let e = store.read(&id).unwrap();
    assert_eq!(e.get_str("/name"), Some("Acme"));
    assert_eq!(e.get_number("/rating"), Some(3.0));
}

#[test]
fn update_cannot_overwrite_bookkeeping() {
    let mut store = supplier_store();
    let original = store.iter().next().unwrap().clone();
    let updated = store
        .update(
            &original.id,
            doc(json!({"id": "hijack", "created": "2000-01-01T00:00:00.000Z", "updated": "x"})),
        )
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.created, original.created);
    assert!(updated.updated >= original.updated);
    assert!(!updated.data.contains_key("id"));
}

#[test]
fn modify_cannot_set_bookkeeping() {
    let mut store: EntityStore<Document> = EntityStore::new("supplier");
    let original = store.create(doc(json!({"name": "Acme"})));

    let modified = store
        .modify(&original.id, |d| {
            d.insert("id".into(), json!("forged"));
            d.insert("created".into(), json!("1999-01-01T00:00:00.000Z"));
            d.insert("status".into(), json!("Blocked"));
        })
        .unwrap();
    assert_eq!(modified.id, original.id);
    assert_eq!(modified.created, original.created);
    assert!(!modified.data.contains_key("id"));
    assert!(!modified.data.contains_key("created"));
    assert_eq!(modified.get_str("/status"), Some("Blocked"));

    assert!(store.list(&Filters::none().with("id", "forged")).is_empty());
    let exported: Vec<serde_json::Value> =
        serde_json::from_str(&store.export(procura_store::ExportFormat::Json).unwrap()).unwrap();
    assert_eq!(exported[0]["id"], json!(original.id.as_str()));
    assert_eq!(exported[0]["created"], json!(original.created.to_iso8601()));
}

#[test]
fn update_unknown_is_none_and_keeps_size() {
    let mut store = supplier_store();
    let result = store.update("supplier-0-missing00", doc(json!({"x": 1}))).unwrap();
    assert!(result.is_none());
    assert_eq!(store.len(), 3);
}

#[test]
fn typed_update_rejects_patch_that_breaks_schema() {
    let mut store: EntityStore<Supplier> = EntityStore::for_schema();
    let created = store.create(Supplier {
        name: "Acme".into(),
        email: "sales@acme.test".into(),
        status: SupplierStatus::Active,
        ..Supplier::default()
    });

    let err = store
        .update(&created.id, doc(json!({"status": "Bankrupt"})))
        .unwrap_err();
    assert!(matches!(err, StoreError::Patch { .. }));
    assert_eq!(store.read(&created.id).unwrap().data.status, SupplierStatus::Active);

    let ok = store
        .update(&created.id, doc(json!({"status": "Blocked"})))
        .unwrap()
        .unwrap();
    assert_eq!(ok.data.status, SupplierStatus::Blocked);
    assert_eq!(ok.data.name, "Acme");
}

#[test]
fn modify_edits_typed_record() {
    let mut store: EntityStore<InventoryItem> = EntityStore::for_schema();
    let item = store.create(InventoryItem {
        sku: "B-1".into(),
        name: "Bolt".into(),
        quantity: 50,
        reorder_point: 10,
        ..InventoryItem::default()
    });

    let modified = store.modify(&item.id, |i| i.quantity = 4).unwrap();
    assert_eq!(modified.data.reorder_status(), ReorderStatus::Reorder);
    assert_eq!(modified.created, item.created);
    assert!(store.modify("inventoryItem-0-nothing00", |i| i.quantity = 0).is_none());
}

// ── Delete ───────────────────────────────────────────────────────

#[test]
fn delete_unknown_is_false_and_keeps_size() {
    let mut store = supplier_store();
    assert!(!store.delete("supplier-0-missing00"));
    assert_eq!(store.len(), 3);
}

#[test]
fn delete_keeps_remaining_order() {
    let mut store = supplier_store();
    let second = store.iter().nth(1).unwrap().id.clone();
    assert!(store.delete(&second));
    let names: Vec<_> = store.iter().map(|e| e.get_str("/name").unwrap()).collect();
    assert_eq!(names, vec!["Acme", "TechParts"]);
}

// ── List ─────────────────────────────────────────────────────────

#[test]
fn list_without_filters_returns_everything_in_order() {
    let store = supplier_store();
    let names: Vec<_> = store
        .list(&Filters::none())
        .iter()
        .map(|e| e.get_str("/name").unwrap())
        .collect();
    assert_eq!(names, vec!["Acme", "Nortech Supplies", "TechParts"]);
}

#[test]
fn list_by_status() {
    let store = supplier_store();
    let active = store.list(&Filters::none().with("status", "Active"));
    assert_eq!(active.len(), 2);
    assert!(active.iter().all(|e| e.get_str("/status") == Some("Active")));
}

#[test]
fn list_by_name_substring_ignores_case() {
    let store = supplier_store();
    let tech = store.list(&Filters::none().with("name", "tech"));
    let names: Vec<_> = tech.iter().map(|e| e.get_str("/name").unwrap()).collect();
    assert_eq!(names, vec!["Nortech Supplies", "TechParts"]);
}

#[test]
fn list_ignores_empty_filter_values() {
    let store = supplier_store();
    let all = store.list(&Filters::none().with("status", "").with("category", serde_json::Value::Null));
    assert_eq!(all.len(), 3);
}

#[test]
fn list_non_string_filter_is_exact() {
    let store = supplier_store();
    let five = store.list(&Filters::none().with("rating", 5));
    assert_eq!(five.len(), 1);
    assert_eq!(five[0].get_str("/name"), Some("TechParts"));
}

#[test]
fn list_combines_filters_with_and() {
    let store = supplier_store();
    let hits = store.list(&Filters::none().with("status", "active").with("name", "acme"));
    assert_eq!(hits.len(), 1);
}

#[test]
fn list_can_filter_on_id() {
    let store = supplier_store();
    let id = store.iter().next().unwrap().id.clone();
    let hits = store.list(&Filters::none().with("id", id.as_str()));
    assert_eq!(hits.len(), 1);
}

// ── Search ───────────────────────────────────────────────────────

#[test]
fn empty_search_returns_everything() {
    let store = supplier_store();
    assert_eq!(store.search("", &["name"]).len(), 3);
    assert_eq!(store.search("   ", &[] as &[&str]).len(), 3);
}

#[test]
fn search_is_or_across_fields() {
    let store = supplier_store();
    let hits = store.search("STEEL", &["name", "category"]);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].get_str("/name"), Some("Acme"));

    let hits = store.search("tech", &["name", "category"]);
    assert_eq!(hits.len(), 2);
}

#[test]
fn search_only_looks_at_named_fields() {
    let store = supplier_store();
    assert!(store.search("steel", &["name"]).is_empty());
}

#[test]
fn search_indexed_uses_schema_fields() {
    let mut store: EntityStore<Supplier> = EntityStore::for_schema();
    store.create(Supplier {
        name: "Acme".into(),
        email: "orders@acme.test".into(),
        phone: "555-0100".into(),
        ..Supplier::default()
    });
    assert_eq!(store.search_indexed("ORDERS@").len(), 1);
    // phone is not a searchable field
    assert!(store.search_indexed("555").is_empty());
}

#[test]
fn search_indexed_without_schema_scans_all_record_fields() {
    let store = supplier_store();
    assert_eq!(store.search_indexed("electronics").len(), 1);
    // bookkeeping fields are not part of the record
    assert!(store.search_indexed("supplier-").is_empty());
}

// ── Construction ─────────────────────────────────────────────────

#[test]
fn for_schema_uses_record_entity_type() {
    let store: EntityStore<Supplier> = EntityStore::for_schema();
    assert_eq!(store.entity_type(), Supplier::ENTITY_TYPE);
    assert!(store.schema().is_some());
    assert!(store.is_empty());
}

#[test]
fn stores_are_independent() {
    let mut suppliers: EntityStore<Document> = EntityStore::new("supplier");
    let mut orders: EntityStore<Document> = EntityStore::new("purchaseOrder");
    let s = suppliers.create(doc(json!({"name": "Acme"})));
    orders.create(doc(json!({"supplier": "Acme"})));
    assert!(orders.read(&s.id).is_none());
    assert_eq!(suppliers.len(), 1);
    assert_eq!(orders.len(), 1);
}

#[test]
fn clear_empties_store() {
    let mut store = supplier_store();
    store.clear();
    assert!(store.is_empty());
    assert_eq!(store.iter().count(), 0);
}
