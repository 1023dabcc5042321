//! Tests for mrdc-model types.

use mrdc_model::{CleaningOptions, EntityKind, ValidEntries};

#[test]
fn target_tables_are_distinct() {
    let mut tables: Vec<&str> = EntityKind::ALL.iter().map(|k| k.target_table()).collect();
    tables.sort_unstable();
    tables.dedup();
    assert_eq!(tables.len(), EntityKind::ALL.len());
    assert_eq!(EntityKind::User.target_table(), "dim_users");
    assert_eq!(EntityKind::Order.target_table(), "orders_table");
}

#[test]
fn options_serialize() {
    let options = CleaningOptions::default();
    let json = serde_json::to_string(&options).expect("serialize options");
    let round: CleaningOptions = serde_json::from_str(&json).expect("deserialize options");
    assert_eq!(round, options);
}

#[test]
fn entity_kind_serializes_snake_case() {
    let json = serde_json::to_string(&EntityKind::DateTime).expect("serialize kind");
    assert_eq!(json, "\"date_time\"");
}

#[test]
fn allow_list_is_case_sensitive() {
    let entries = ValidEntries::new("card_provider", ["VISA 16 digit"]);
    assert!(entries.contains(Some("VISA 16 digit")));
    assert!(!entries.contains(Some("visa 16 digit")));
}
