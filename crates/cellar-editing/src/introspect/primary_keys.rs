//! Primary-key resolution
//!
//! Assigns one primary-key column per table from a fixed, closed priority
//! list of conventional key names. Table order (FROM, then JOINs in source
//! order) and candidate priority together fully determine the outcome.

use super::{ColumnInfo, TableRef};

/// Canonical primary-key field names, in priority order. A closed policy,
/// not runtime-configurable.
pub const PRIMARY_KEY_CANDIDATES: [&str; 4] = ["id", "uuid", "pk", "_id"];

/// Resolves a primary key for each table, mutating the table and column
/// metadata in place.
///
/// For each table, the first candidate name with a column already mapped to
/// that table wins. Failing that, any still-unclaimed column whose result
/// name equals a candidate is claimed as a fallback; if that column had no
/// owning table it is adopted by this one.
pub fn resolve_primary_keys(tables: &mut [TableRef], columns: &mut [ColumnInfo]) {
    for table_index in 0..tables.len() {
        if resolve_from_mapped_column(table_index, tables, columns) {
            continue;
        }
        resolve_from_result_name(table_index, tables, columns);
    }
}

/// Looks for a column mapped to this table whose field name equals a
/// candidate, scanning candidates in priority order.
fn resolve_from_mapped_column(
    table_index: usize,
    tables: &mut [TableRef],
    columns: &mut [ColumnInfo],
) -> bool {
    let table_name = tables[table_index].name.clone();

    for candidate in PRIMARY_KEY_CANDIDATES {
        let found = columns.iter_mut().find(|column| {
            column.table_name.as_deref() == Some(table_name.as_str())
                && column.field_name.eq_ignore_ascii_case(candidate)
        });
        if let Some(column) = found {
            column.is_primary_key = true;
            tables[table_index].primary_key_column = Some(column.result_name.clone());
            tables[table_index].primary_key_field = column.field_name.clone();
            return true;
        }
    }
    false
}

/// Fallback: claims a column by bare result name, skipping columns already
/// claimed as another table's primary key.
fn resolve_from_result_name(
    table_index: usize,
    tables: &mut [TableRef],
    columns: &mut [ColumnInfo],
) {
    let table_name = tables[table_index].name.clone();

    for candidate in PRIMARY_KEY_CANDIDATES {
        let found = columns.iter_mut().find(|column| {
            !column.is_primary_key && column.result_name.eq_ignore_ascii_case(candidate)
        });
        if let Some(column) = found {
            column.is_primary_key = true;
            if column.table_name.is_none() {
                column.table_name = Some(table_name.clone());
            }
            tables[table_index].primary_key_column = Some(column.result_name.clone());
            tables[table_index].primary_key_field = column.field_name.clone();
            return;
        }
    }
}
