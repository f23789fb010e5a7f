//! SQL quoting helpers
//!
//! Generated statements are never parameterized, so literal quoting here is
//! the injection barrier: `quote_literal` must double every embedded single
//! quote, and callers must never interpolate raw values themselves.

/// Quotes an identifier (table or column name) with double quotes,
/// doubling any embedded double quote.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quotes a string literal with single quotes, doubling any embedded
/// single quote.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
