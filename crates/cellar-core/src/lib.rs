//! Cellar Core - Shared types for the editable results grid
//!
//! This crate provides the types that the rest of Cellar builds on:
//!
//! - `Cell` / `CellGrid` - the row-major result grid and its snapshots
//! - `NULL_SENTINEL` - the string standing in for a database NULL
//! - SQL quoting helpers for identifiers and literals

mod error;
pub mod quoting;
mod types;

pub use error::*;
pub use quoting::{quote_ident, quote_literal};
pub use types::*;
