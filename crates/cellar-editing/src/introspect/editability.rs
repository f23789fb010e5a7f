//! Query-level editability classification
//!
//! A query permits editing only when no disqualifying construct appears in
//! its text, at least one table was resolved, and at least one table has a
//! resolved primary key. The per-cell rule lives on
//! [`QueryMetadata::is_cell_read_only`](super::QueryMetadata::is_cell_read_only).

use super::TableRef;
use regex::Regex;
use std::sync::LazyLock;

// Aggregation, set operations, and DISTINCT make result rows impossible to
// map back to single stored rows.
static DISQUALIFIER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:GROUP\s+BY|HAVING|UNION|INTERSECT|EXCEPT|DISTINCT)\b|\b(?:COUNT|SUM|AVG|MIN|MAX)\s*\(",
    )
    .expect("valid regex")
});

/// Decides whether the query as a whole permits editing.
pub fn classify(normalized_query: &str, tables: &[TableRef]) -> bool {
    if DISQUALIFIER_REGEX.is_match(normalized_query) {
        tracing::debug!("query contains a disqualifying construct, not editable");
        return false;
    }
    if tables.is_empty() {
        return false;
    }
    tables.iter().any(TableRef::has_primary_key)
}
