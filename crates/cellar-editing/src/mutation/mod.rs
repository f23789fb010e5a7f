//! Mutation synthesis
//!
//! Renders each [`TableChange`] into exactly one UPDATE statement. The
//! statements are independent: no transaction wrapping, no batching —
//! atomicity across several statements is the caller's decision.
//!
//! Values are never parameterized, so the literal encoding in
//! [`encode_value`] is the injection barrier.

#[cfg(test)]
mod tests;

use crate::changes::{RowChanges, TableChange};
use cellar_core::{NULL_SENTINEL, quote_ident, quote_literal};

/// Cast suffix appended to values that look like JSON documents.
const JSON_CAST: &str = "::jsonb";

/// Encodes one cell value as a SQL literal.
///
/// The NULL sentinel becomes the bare keyword; values shaped like JSON
/// objects or arrays get a quoted literal with an explicit cast; everything
/// else is single-quoted with embedded quotes doubled.
pub fn encode_value(value: &str) -> String {
    if value == NULL_SENTINEL {
        return "NULL".to_string();
    }
    let trimmed = value.trim();
    let looks_like_json = (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'));
    if looks_like_json {
        return format!("{}{}", quote_literal(value), JSON_CAST);
    }
    quote_literal(value)
}

/// Renders one UPDATE statement for a single table-change group.
///
/// SET clause order follows the change map's insertion order.
pub fn synthesize_update(change: &TableChange) -> String {
    let assignments = change
        .changes
        .iter()
        .map(|(field, field_change)| {
            format!("{} = {}", quote_ident(field), encode_value(&field_change.new_value))
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "UPDATE {} SET {} WHERE {} = {}",
        quote_ident(&change.table_name),
        assignments,
        quote_ident(&change.primary_key_field),
        encode_value(&change.primary_key_value),
    )
}

/// Renders the full ordered statement list for a diff pass: row order first,
/// then each row's table changes in detection order.
///
/// The caller executes these one at a time; nothing here rolls back already
/// executed statements if a later one fails.
pub fn synthesize_all(rows: &[RowChanges]) -> Vec<String> {
    rows.iter()
        .flat_map(|row| row.table_changes.iter().map(synthesize_update))
        .collect()
}
