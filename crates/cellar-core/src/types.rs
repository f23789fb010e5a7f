//! Core grid types for Cellar

use serde::{Deserialize, Serialize};

/// The string value that represents a database NULL inside the cell model.
///
/// Distinct from the empty string: an empty cell is an empty string, a NULL
/// cell holds this exact sentinel.
pub const NULL_SENTINEL: &str = "NULL";

/// A single cell of a query result grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Display value as a string (typed values are stringified upstream)
    pub value: String,
    /// Whether the UI must refuse edits to this cell
    pub read_only: bool,
}

impl Cell {
    /// Creates an editable cell with the given value
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            read_only: false,
        }
    }

    /// Creates a read-only cell with the given value
    pub fn read_only(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            read_only: true,
        }
    }

    /// Returns true if the cell holds the NULL sentinel
    pub fn is_null(&self) -> bool {
        self.value == NULL_SENTINEL
    }
}

/// A row-major matrix of cells.
///
/// Two instances exist per query run: "original" (captured right after a
/// successful execution) and "current" (mutated by user edits). The two must
/// always have identical dimensions and identical `read_only` flags per
/// position; only `value` may differ. [`CellGrid::same_shape`] checks that
/// invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellGrid {
    rows: Vec<Vec<Cell>>,
}

impl CellGrid {
    /// Creates an empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a grid from pre-built rows
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Creates a grid of editable cells from raw string values
    pub fn from_values(values: Vec<Vec<String>>) -> Self {
        Self {
            rows: values
                .into_iter()
                .map(|row| row.into_iter().map(Cell::new).collect())
                .collect(),
        }
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (taken from the first row)
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Gets a cell by position
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Gets a cell mutably by position
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row).and_then(|r| r.get_mut(col))
    }

    /// Iterates over the rows
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Checks the snapshot invariant against another grid: identical
    /// dimensions and identical `read_only` flags at every position.
    pub fn same_shape(&self, other: &CellGrid) -> bool {
        if self.rows.len() != other.rows.len() {
            return false;
        }
        self.rows.iter().zip(other.rows.iter()).all(|(a, b)| {
            a.len() == b.len()
                && a.iter()
                    .zip(b.iter())
                    .all(|(x, y)| x.read_only == y.read_only)
        })
    }
}
