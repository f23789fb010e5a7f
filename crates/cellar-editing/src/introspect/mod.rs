//! Query introspection
//!
//! Derives table, column-ownership, primary-key, and editability facts from
//! a query's text and its result column names. No SQL grammar is involved:
//! the stages below apply fixed regex heuristics, and their known blind
//! spots (schema qualifiers dropped, pattern-based computed-column
//! detection) are part of the contract.
//!
//! # Example
//!
//! ```
//! use cellar_editing::introspect;
//!
//! let meta = introspect(
//!     "SELECT id, name FROM users",
//!     &["id".to_string(), "name".to_string()],
//! );
//! assert!(meta.is_editable);
//! assert!(meta.is_cell_read_only(0)); // primary key
//! assert!(!meta.is_cell_read_only(1));
//! ```

mod columns;
mod editability;
mod primary_keys;
mod tables;

pub use primary_keys::PRIMARY_KEY_CANDIDATES;


use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// A base table referenced by the query, in FROM/JOIN order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    /// Table name, lowercased; schema qualifiers are dropped
    pub name: String,
    /// Alias from the query text, lowercased
    pub alias: Option<String>,
    /// Result-column name that carries this table's primary key, if resolved
    pub primary_key_column: Option<String>,
    /// Field name used in the WHERE clause of synthesized updates
    pub primary_key_field: String,
}

impl TableRef {
    /// Creates a table reference with the default primary-key field
    pub fn new(name: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            name: name.into(),
            alias,
            primary_key_column: None,
            primary_key_field: "id".to_string(),
        }
    }

    /// Returns true if a primary key has been resolved for this table
    pub fn has_primary_key(&self) -> bool {
        self.primary_key_column.is_some()
    }
}

/// Ownership and editability facts for one result column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Column name as returned by the execution service
    pub result_name: String,
    /// Owning table name, when one could be determined
    pub table_name: Option<String>,
    /// Stored field name behind this column (differs from `result_name`
    /// when the query aliases it)
    pub field_name: String,
    /// True if the column looks derived from an expression rather than a
    /// single stored field
    pub is_computed: bool,
    /// True if this column was claimed as some table's primary key
    pub is_primary_key: bool,
}

impl ColumnInfo {
    fn unmapped(result_name: &str) -> Self {
        Self {
            result_name: result_name.to_string(),
            table_name: None,
            field_name: result_name.to_string(),
            is_computed: false,
            is_primary_key: false,
        }
    }
}

/// The combined facts derived from one query's text and result shape.
///
/// Immutable once built; rebuild whenever the query text or the result
/// column list changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryMetadata {
    /// Referenced tables, FROM table first, then JOINs in source order
    pub tables: Vec<TableRef>,
    /// One entry per result column, in result order
    pub columns: Vec<ColumnInfo>,
    /// Whether the query as a whole permits editing
    pub is_editable: bool,
}

impl QueryMetadata {
    /// Looks up the table that owns the given column
    pub fn table_for_column(&self, column: &ColumnInfo) -> Option<&TableRef> {
        let table_name = column.table_name.as_deref()?;
        self.tables.iter().find(|t| t.name == table_name)
    }

    /// Finds a column index by result name
    pub fn column_index(&self, result_name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.result_name == result_name)
    }

    /// Per-cell read-only rule, derived entirely from this metadata.
    ///
    /// A cell is read-only if the query is not editable, the column is
    /// computed, is a primary key, has no owning table, or its owning table
    /// has no resolved primary key. Columns out of range are read-only.
    pub fn is_cell_read_only(&self, col_index: usize) -> bool {
        if !self.is_editable {
            return true;
        }
        let Some(column) = self.columns.get(col_index) else {
            return true;
        };
        if column.is_computed || column.is_primary_key {
            return true;
        }
        match self.table_for_column(column) {
            Some(table) => !table.has_primary_key(),
            None => true,
        }
    }
}

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Collapses consecutive whitespace to single spaces and trims the ends.
pub(crate) fn normalize_whitespace(query: &str) -> String {
    WHITESPACE_REGEX.replace_all(query.trim(), " ").into_owned()
}

/// Derives [`QueryMetadata`] from a query's text and its ordered result
/// column names.
///
/// The result column names come from the external execution step, not from
/// parsing the SELECT list; the text heuristics only decide ownership and
/// editability on top of that shape.
#[tracing::instrument(skip_all, fields(columns = result_columns.len()))]
pub fn introspect(query: &str, result_columns: &[String]) -> QueryMetadata {
    let normalized = normalize_whitespace(query);

    let mut tables = tables::extract_tables(&normalized);
    let mut columns = columns::map_columns(&normalized, result_columns, &tables);
    primary_keys::resolve_primary_keys(&mut tables, &mut columns);
    let is_editable = editability::classify(&normalized, &tables);

    tracing::debug!(
        tables = tables.len(),
        is_editable,
        "query introspection complete"
    );

    QueryMetadata {
        tables,
        columns,
        is_editable,
    }
}
