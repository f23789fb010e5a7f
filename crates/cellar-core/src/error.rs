//! Error types for Cellar

use thiserror::Error;

/// Core error type for Cellar operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CellarError {
    #[error(
        "snapshot shape mismatch: current is {current_rows}x{current_cols}, original is {original_rows}x{original_cols}"
    )]
    SnapshotShapeMismatch {
        current_rows: usize,
        current_cols: usize,
        original_rows: usize,
        original_cols: usize,
    },
}

/// Result type alias for Cellar operations
pub type Result<T> = std::result::Result<T, CellarError>;
