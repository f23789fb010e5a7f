//! Change tracking
//!
//! Diffs the current cell snapshot against the original one and groups the
//! edits by table and primary-key value. The output is ephemeral: callers
//! regenerate it on every diff pass and discard it after a successful save
//! (resetting "original" to equal "current").


use crate::introspect::QueryMetadata;
use cellar_core::{CellGrid, CellarError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One edited field: the value it had and the value it has now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub old_value: String,
    pub new_value: String,
}

/// One row's edited fields for one specific table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableChange {
    /// Table the changes belong to
    pub table_name: String,
    /// Result-column name carrying the table's primary key
    pub primary_key_column: String,
    /// Field name for the WHERE clause of the synthesized update
    pub primary_key_field: String,
    /// The row's primary-key value, read from the current snapshot
    pub primary_key_value: String,
    /// Edited fields keyed by stored field name, in detection order
    pub changes: IndexMap<String, FieldChange>,
}

/// All changes detected within a single row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowChanges {
    pub row_index: usize,
    pub table_changes: Vec<TableChange>,
}

/// Diffs `current` against `original` and groups the edits.
///
/// Returns an empty list when the query is not editable. Cells whose table
/// has no resolved primary key, or whose row is missing a primary-key
/// value, are dropped silently by policy; the rest of the row and the other
/// rows still process. The only error is a snapshot-shape violation, which
/// indicates a caller bug rather than a user edit.
#[tracing::instrument(skip_all, fields(rows = current.row_count()))]
pub fn track_changes(
    metadata: &QueryMetadata,
    current: &CellGrid,
    original: &CellGrid,
) -> Result<Vec<RowChanges>> {
    if !current.same_shape(original) {
        return Err(CellarError::SnapshotShapeMismatch {
            current_rows: current.row_count(),
            current_cols: current.column_count(),
            original_rows: original.row_count(),
            original_cols: original.column_count(),
        });
    }
    if !metadata.is_editable {
        return Ok(Vec::new());
    }

    let mut all_rows = Vec::new();
    for row_index in 0..current.row_count() {
        let row_changes = diff_row(metadata, current, original, row_index);
        if !row_changes.is_empty() {
            all_rows.push(RowChanges {
                row_index,
                table_changes: row_changes,
            });
        }
    }
    Ok(all_rows)
}

/// Diffs one row, grouping changes by `(table, primary-key value)` so the
/// grouping is independent of column iteration order.
fn diff_row(
    metadata: &QueryMetadata,
    current: &CellGrid,
    original: &CellGrid,
    row_index: usize,
) -> Vec<TableChange> {
    let mut groups: IndexMap<(String, String), TableChange> = IndexMap::new();

    for (col_index, column) in metadata.columns.iter().enumerate() {
        let (Some(cell), Some(original_cell)) = (
            current.get(row_index, col_index),
            original.get(row_index, col_index),
        ) else {
            continue;
        };
        if cell.read_only {
            continue;
        }
        if column.is_computed || column.is_primary_key || column.table_name.is_none() {
            continue;
        }
        if cell.value == original_cell.value {
            continue;
        }

        let Some(table) = metadata.table_for_column(column) else {
            continue;
        };
        let Some(pk_column) = table.primary_key_column.as_deref() else {
            tracing::debug!(
                table = %table.name,
                column = %column.result_name,
                "dropping change: table has no resolved primary key"
            );
            continue;
        };
        let pk_value = metadata
            .column_index(pk_column)
            .and_then(|pk_index| current.get(row_index, pk_index))
            .map(|pk_cell| pk_cell.value.clone())
            .unwrap_or_default();
        if pk_value.is_empty() {
            tracing::debug!(
                table = %table.name,
                column = %column.result_name,
                row = row_index,
                "dropping change: row has no primary-key value"
            );
            continue;
        }

        let entry = groups
            .entry((table.name.clone(), pk_value.clone()))
            .or_insert_with(|| TableChange {
                table_name: table.name.clone(),
                primary_key_column: pk_column.to_string(),
                primary_key_field: table.primary_key_field.clone(),
                primary_key_value: pk_value,
                changes: IndexMap::new(),
            });
        entry.changes.insert(
            column.field_name.clone(),
            FieldChange {
                old_value: original_cell.value.clone(),
                new_value: cell.value.clone(),
            },
        );
    }

    groups.into_values().collect()
}
