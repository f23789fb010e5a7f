//! Table extraction
//!
//! Locates the tables a query reads from by scanning for `FROM` and `JOIN`
//! clauses. Identifiers may be bare, double-quoted, or schema-qualified;
//! only the table portion of a qualified name is retained.

use super::TableRef;
use regex::Regex;
use std::sync::LazyLock;

// Matches `FROM <table>` / `JOIN <table>` with an optional schema qualifier
// and an optional `[AS] alias`. Either side of the qualifier may be quoted.
static TABLE_CLAUSE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(FROM|JOIN)\s+(?:("[^"]+"|[A-Za-z_][A-Za-z0-9_]*)\s*\.\s*)?("[^"]+"|[A-Za-z_][A-Za-z0-9_]*)(?:\s+(?:AS\s+)?("[^"]+"|[A-Za-z_][A-Za-z0-9_]*))?"#,
    )
    .expect("valid regex")
});

// Keywords that can directly follow a table name and must not be taken as
// its alias.
const NON_ALIAS_KEYWORDS: &[&str] = &[
    "as", "cross", "except", "from", "full", "group", "having", "inner", "intersect", "join",
    "left", "limit", "natural", "offset", "on", "order", "outer", "right", "select", "set",
    "union", "using", "where",
];

/// Extracts the tables referenced by a normalized query.
///
/// Returns the FROM table first (first occurrence wins if the text is
/// malformed), then every JOIN table in source order. Names and aliases are
/// lowercased. An empty result means the query will later be classified
/// non-editable.
pub fn extract_tables(normalized_query: &str) -> Vec<TableRef> {
    let mut from_table: Option<TableRef> = None;
    let mut join_tables: Vec<TableRef> = Vec::new();

    for caps in TABLE_CLAUSE_REGEX.captures_iter(normalized_query) {
        let keyword = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let raw_table = match caps.get(3) {
            Some(m) => m.as_str(),
            None => continue,
        };
        // The schema qualifier (group 2) is discarded by contract.
        let name = strip_quotes(raw_table).to_lowercase();
        let alias = caps.get(4).and_then(|m| parse_alias(m.as_str()));

        let table = TableRef::new(name, alias);
        if keyword.eq_ignore_ascii_case("from") {
            if from_table.is_none() {
                from_table = Some(table);
            }
        } else {
            join_tables.push(table);
        }
    }

    let mut tables = Vec::with_capacity(join_tables.len() + 1);
    tables.extend(from_table);
    tables.extend(join_tables);
    tables
}

/// Strips one level of surrounding double quotes, if present.
fn strip_quotes(identifier: &str) -> &str {
    identifier
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(identifier)
}

/// Interprets the text following a table name as its alias, unless it is a
/// clause keyword. Quoted aliases are always accepted.
fn parse_alias(raw: &str) -> Option<String> {
    if raw.starts_with('"') {
        return Some(strip_quotes(raw).to_lowercase());
    }
    let lowered = raw.to_lowercase();
    if NON_ALIAS_KEYWORDS.contains(&lowered.as_str()) {
        None
    } else {
        Some(lowered)
    }
}
