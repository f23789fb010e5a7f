//! End-to-end flow: introspect a query, apply edits to the current
//! snapshot, diff, and synthesize the statements a caller would execute.

use cellar_editing::{introspect, synthesize_all, track_changes};
use cellar_core::CellGrid;
use pretty_assertions::assert_eq;

fn cols(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn grid(values: &[&[&str]]) -> CellGrid {
    CellGrid::from_values(
        values
            .iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect(),
    )
}

#[test]
fn edit_save_cycle_for_a_simple_query() {
    let metadata = introspect("SELECT * FROM users", &cols(&["id", "name", "email"]));
    assert!(metadata.is_editable);

    // The grid captures "original" right after execution, then the user
    // edits "current". Read-only flags come from the metadata.
    let mut original = grid(&[
        &["1", "alice", "a@example.com"],
        &["2", "bob", "b@example.com"],
    ]);
    for row in 0..original.row_count() {
        for col in 0..original.column_count() {
            original.get_mut(row, col).unwrap().read_only = metadata.is_cell_read_only(col);
        }
    }
    let mut current = original.clone();
    current.get_mut(0, 1).unwrap().value = "O'Connor".to_string();
    current.get_mut(1, 2).unwrap().value = "NULL".to_string();

    let changes = track_changes(&metadata, &current, &original).unwrap();
    assert_eq!(changes.len(), 2);

    let statements = synthesize_all(&changes);
    assert_eq!(
        statements,
        vec![
            r#"UPDATE "users" SET "name" = 'O''Connor' WHERE "id" = '1'"#.to_string(),
            r#"UPDATE "users" SET "email" = NULL WHERE "id" = '2'"#.to_string(),
        ]
    );

    // After a successful save the caller resets "original" to "current";
    // the next diff pass is empty.
    let original = current.clone();
    let changes = track_changes(&metadata, &current, &original).unwrap();
    assert!(changes.is_empty());
}

#[test]
fn joined_query_produces_one_statement_per_table() {
    let metadata = introspect(
        "SELECT u.id, u.name, o._id, o.total FROM users u JOIN orders o ON u.id = o.user_id",
        &cols(&["id", "name", "_id", "total"]),
    );
    assert!(metadata.is_editable);

    let original = grid(&[&["1", "alice", "9", "100"]]);
    let mut current = original.clone();
    current.get_mut(0, 1).unwrap().value = "alicia".to_string();
    current.get_mut(0, 3).unwrap().value = r#"{"amount":250}"#.to_string();

    let changes = track_changes(&metadata, &current, &original).unwrap();
    let statements = synthesize_all(&changes);
    assert_eq!(
        statements,
        vec![
            r#"UPDATE "users" SET "name" = 'alicia' WHERE "id" = '1'"#.to_string(),
            r#"UPDATE "orders" SET "total" = '{"amount":250}'::jsonb WHERE "_id" = '9'"#.to_string(),
        ]
    );
}
