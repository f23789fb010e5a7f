//! Tests for mutation synthesis

use super::*;
use crate::changes::{FieldChange, TableChange};
use indexmap::IndexMap;
use pretty_assertions::assert_eq;

fn change(table: &str, pk_value: &str, fields: &[(&str, &str)]) -> TableChange {
    let mut changes = IndexMap::new();
    for (field, new_value) in fields {
        changes.insert(
            field.to_string(),
            FieldChange {
                old_value: String::new(),
                new_value: new_value.to_string(),
            },
        );
    }
    TableChange {
        table_name: table.to_string(),
        primary_key_column: "id".to_string(),
        primary_key_field: "id".to_string(),
        primary_key_value: pk_value.to_string(),
        changes,
    }
}

#[test]
fn test_single_field_update() {
    let statement = synthesize_update(&change("users", "1", &[("name", "alice")]));
    assert_eq!(
        statement,
        r#"UPDATE "users" SET "name" = 'alice' WHERE "id" = '1'"#
    );
}

#[test]
fn test_set_clause_follows_insertion_order() {
    let statement = synthesize_update(&change(
        "users",
        "1",
        &[("name", "alice"), ("email", "a@example.com")],
    ));
    assert_eq!(
        statement,
        r#"UPDATE "users" SET "name" = 'alice', "email" = 'a@example.com' WHERE "id" = '1'"#
    );
}

#[test]
fn test_null_sentinel_encodes_bare() {
    let statement = synthesize_update(&change("users", "1", &[("name", "NULL")]));
    assert_eq!(
        statement,
        r#"UPDATE "users" SET "name" = NULL WHERE "id" = '1'"#
    );
}

#[test]
fn test_json_object_gets_cast() {
    let statement = synthesize_update(&change("users", "1", &[("prefs", r#"{"a":1}"#)]));
    assert_eq!(
        statement,
        r#"UPDATE "users" SET "prefs" = '{"a":1}'::jsonb WHERE "id" = '1'"#
    );
}

#[test]
fn test_json_array_gets_cast() {
    let statement = synthesize_update(&change("users", "1", &[("tags", "[1, 2]")]));
    assert_eq!(
        statement,
        r#"UPDATE "users" SET "tags" = '[1, 2]'::jsonb WHERE "id" = '1'"#
    );
}

#[test]
fn test_json_detection_tolerates_surrounding_whitespace() {
    let statement = synthesize_update(&change("users", "1", &[("prefs", r#" {"a":1} "#)]));
    assert_eq!(
        statement,
        r#"UPDATE "users" SET "prefs" = ' {"a":1} '::jsonb WHERE "id" = '1'"#
    );
}

#[test]
fn test_embedded_quote_is_doubled_exactly_once() {
    let statement = synthesize_update(&change("users", "1", &[("name", "O'Brien")]));
    assert_eq!(
        statement,
        r#"UPDATE "users" SET "name" = 'O''Brien' WHERE "id" = '1'"#
    );
}

#[test]
fn test_injection_attempt_stays_inside_the_literal() {
    let statement = synthesize_update(&change(
        "users",
        "1",
        &[("name", "x'; DROP TABLE users; --")],
    ));
    assert_eq!(
        statement,
        r#"UPDATE "users" SET "name" = 'x''; DROP TABLE users; --' WHERE "id" = '1'"#
    );
}

#[test]
fn test_primary_key_value_is_encoded_too() {
    let statement = synthesize_update(&change("users", "O'id", &[("name", "alice")]));
    assert_eq!(
        statement,
        r#"UPDATE "users" SET "name" = 'alice' WHERE "id" = 'O''id'"#
    );
}

#[test]
fn test_synthesize_all_orders_rows_then_tables() {
    use crate::changes::RowChanges;

    let rows = vec![
        RowChanges {
            row_index: 0,
            table_changes: vec![
                change("users", "1", &[("name", "a")]),
                change("orders", "9", &[("total", "10")]),
            ],
        },
        RowChanges {
            row_index: 2,
            table_changes: vec![change("users", "3", &[("name", "c")])],
        },
    ];

    let statements = synthesize_all(&rows);
    assert_eq!(statements.len(), 3);
    assert!(statements[0].starts_with(r#"UPDATE "users""#));
    assert!(statements[1].starts_with(r#"UPDATE "orders""#));
    assert!(statements[2].ends_with(r#"WHERE "id" = '3'"#));
}

#[test]
fn test_encode_value_rules() {
    assert_eq!(encode_value("NULL"), "NULL");
    assert_eq!(encode_value("null"), "'null'");
    assert_eq!(encode_value(""), "''");
    assert_eq!(encode_value("plain"), "'plain'");
    assert_eq!(encode_value(r#"{"k":"v"}"#), r#"'{"k":"v"}'::jsonb"#);
    assert_eq!(encode_value("[]"), "'[]'::jsonb");
    assert_eq!(encode_value("{incomplete"), "'{incomplete'");
}
