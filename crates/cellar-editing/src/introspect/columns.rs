//! Column mapping
//!
//! Pairs each result column with an owning table and stored field by
//! scanning the SELECT clause for `alias.field` references, and flags
//! columns that look computed. Pattern-based on purpose: false positives
//! and negatives within these exact rules are accepted behavior.

use super::{ColumnInfo, TableRef};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static SELECT_CLAUSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bSELECT\b(.*?)(?:\bFROM\b|$)").expect("valid regex"));

// `<alias-or-table>.<field>`, either side optionally quoted.
static QUALIFIED_REF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"("[^"]+"|[A-Za-z_][A-Za-z0-9_]*)\s*\.\s*("[^"]+"|[A-Za-z_][A-Za-z0-9_]*)"#)
        .expect("valid regex")
});

/// A `qualifier.field` occurrence found in the SELECT clause.
struct QualifiedRef {
    /// Full matched span, lowercased, for the span-contains rule
    span_lower: String,
    /// Qualifier, lowercased and unquoted, resolved through the alias map
    qualifier_lower: String,
    /// Field name, unquoted
    field: String,
}

/// Maps each result column to an owning table and field.
///
/// `result_columns` is the ordered column list the execution service
/// returned; the output has exactly one entry per result column, in order.
pub fn map_columns(
    normalized_query: &str,
    result_columns: &[String],
    tables: &[TableRef],
) -> Vec<ColumnInfo> {
    let select_clause = select_clause(normalized_query);
    let sole_table = match tables {
        [only] => Some(only.name.clone()),
        _ => None,
    };

    // SELECT *: every column belongs to the sole table, or to no table at
    // all when the query joins more than one.
    if select_clause.trim() == "*" {
        return result_columns
            .iter()
            .map(|name| {
                let mut column = ColumnInfo::unmapped(name);
                column.table_name = sole_table.clone();
                column
            })
            .collect();
    }

    let alias_map = build_alias_map(tables);
    let refs = qualified_refs(&select_clause);

    result_columns
        .iter()
        .map(|result_name| {
            let mut column = ColumnInfo::unmapped(result_name);
            let result_lower = result_name.to_lowercase();

            // First qualifying reference wins: either the matched span
            // contains the result-column name, or the field name equals it
            // case-insensitively. The qualifier must resolve to a table.
            for qref in &refs {
                let span_match = qref.span_lower.contains(&result_lower);
                let field_match = qref.field.eq_ignore_ascii_case(result_name);
                if !span_match && !field_match {
                    continue;
                }
                if let Some(table) = alias_map.get(&qref.qualifier_lower) {
                    column.table_name = Some(table.clone());
                    column.field_name = qref.field.clone();
                    break;
                }
            }

            if column.table_name.is_none() {
                column.table_name = sole_table.clone();
            }
            column.is_computed = is_computed(&select_clause, result_name);
            column
        })
        .collect()
}

/// Returns the text between SELECT and FROM (or the end of the query).
fn select_clause(normalized_query: &str) -> String {
    SELECT_CLAUSE_REGEX
        .captures(normalized_query)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Each table maps from its own alias and from its own name.
fn build_alias_map(tables: &[TableRef]) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for table in tables {
        map.insert(table.name.clone(), table.name.clone());
        if let Some(alias) = &table.alias {
            map.insert(alias.clone(), table.name.clone());
        }
    }
    map
}

fn qualified_refs(select_clause: &str) -> Vec<QualifiedRef> {
    QUALIFIED_REF_REGEX
        .captures_iter(select_clause)
        .map(|caps| QualifiedRef {
            span_lower: caps[0].to_lowercase(),
            qualifier_lower: strip_quotes(&caps[1]).to_lowercase(),
            field: strip_quotes(&caps[2]).to_string(),
        })
        .collect()
}

fn strip_quotes(identifier: &str) -> &str {
    identifier
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(identifier)
}

/// Computed-column heuristic.
///
/// A column is computed when the SELECT clause matches one of four fixed
/// textual patterns followed by (optional `AS` and) the column name:
/// a parenthesized expression, an arithmetic binary expression, a `||`
/// concatenation, or a call to one of `coalesce`, `case`, `nullif`,
/// `concat`.
fn is_computed(select_clause: &str, result_name: &str) -> bool {
    let name = regex::escape(result_name);

    let patterns = [
        // (expr) AS name
        format!(r"(?i)\)\s*(?:AS\s+)?\b{name}\b"),
        // a + b AS name
        format!(r#"(?i)[+\-*/]\s*[\w."']+\s+(?:AS\s+)?\b{name}\b"#),
        // a || b AS name
        format!(r"(?i)\|\|[^,]*?(?:AS\s+)?\b{name}\b"),
        // coalesce(...) AS name, nullif(...), concat(...)
        format!(r"(?i)\b(?:coalesce|nullif|concat)\s*\([^)]*\)\s*(?:AS\s+)?\b{name}\b"),
        // CASE ... END AS name
        format!(r"(?i)\bcase\b.*?\bend\b\s*(?:AS\s+)?\b{name}\b"),
    ];

    patterns.iter().any(|pattern| {
        Regex::new(pattern)
            .expect("valid regex")
            .is_match(select_clause)
    })
}
