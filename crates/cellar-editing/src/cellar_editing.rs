//! Cellar Editing - Editable-query introspection and mutation synthesis
//!
//! This crate decides, for an arbitrary ad-hoc read query, which result cells
//! may be safely edited in the grid, and turns user edits back into
//! injection-safe UPDATE statements. It works in three stages:
//!
//! 1. [`introspect`] derives [`QueryMetadata`] (tables, column ownership,
//!    primary keys, editability) from the query text and the result column
//!    names, using fixed textual heuristics rather than a SQL grammar.
//! 2. [`track_changes`] diffs the current cell snapshot against the original
//!    one and groups edits per table and primary-key value.
//! 3. [`synthesize_update`] / [`synthesize_all`] render each change group
//!    into one UPDATE statement with correct literal encoding.
//!
//! Every stage is a synchronous, side-effect-free transform over its inputs;
//! multiple grids can call into this crate concurrently.

pub mod cache;
pub mod changes;
pub mod introspect;
pub mod mutation;

pub use cache::MetadataCache;
pub use changes::{FieldChange, RowChanges, TableChange, track_changes};
pub use introspect::{ColumnInfo, QueryMetadata, TableRef, introspect};
pub use mutation::{synthesize_all, synthesize_update};
