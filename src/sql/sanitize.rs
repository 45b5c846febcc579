//! SQL Identifier Sanitization Utilities
//!
//! Provides functions to safely validate and quote SQL identifiers, and to
//! screen free-text filter expressions for destructive statements.

use regex::Regex;

use crate::error::{Result, ToolError};

/// Patterns that disqualify a filter expression.
///
/// A statement terminator followed by a comment marker, plus the keywords of
/// destructive or structural statements. This is a denylist, not a parser:
/// it is a heuristic screening layer and no substitute for binding caller
/// text as parameters of a prepared read-only statement.
const DENIED_FILTER_PATTERNS: &[&str] = &[
    r";\s*--",
    r"\bDROP\b",
    r"\bDELETE\b",
    r"\bUPDATE\b",
    r"\bINSERT\b",
    r"\bALTER\b",
    r"\bCREATE\b",
    r"\bTRUNCATE\b",
];

/// Quote a SQL identifier to make it safe for use in queries
///
/// # Example
/// ```
/// use resource_tools::sql::quote_identifier;
///
/// let quoted = quote_identifier("my_table");
/// assert_eq!(quoted, "\"my_table\"");
/// ```
pub fn quote_identifier(identifier: &str) -> String {
    // Escape any double quotes in the identifier by doubling them
    let escaped = identifier.replace('"', "\"\"");
    format!("\"{}\"", escaped)
}

/// Validate a table or column name
///
/// Rules:
/// - Must start with a letter or underscore
/// - Can only contain letters, numbers, and underscores
///
/// # Example
/// ```
/// use resource_tools::sql::validate_identifier;
///
/// assert!(validate_identifier("users").is_ok());
/// assert!(validate_identifier("users; DROP").is_err());
/// ```
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ToolError::invalid_identifier("identifier is empty"));
    }

    let re = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
    if !re.is_match(name) {
        return Err(ToolError::invalid_identifier(name));
    }

    Ok(())
}

/// Validate a comma-separated column list
///
/// The literal wildcard `*` is accepted alone; otherwise every trimmed
/// element must independently be a valid identifier.
pub fn validate_columns(columns: &str) -> Result<()> {
    if columns == "*" {
        return Ok(());
    }

    for column in columns.split(',') {
        validate_identifier(column.trim())?;
    }

    Ok(())
}

/// Screen a free-text filter expression for destructive statements
///
/// Rejects, case-insensitively, a statement terminator followed by a
/// comment marker and the keywords DROP, DELETE, UPDATE, INSERT, ALTER,
/// CREATE, TRUNCATE.
pub fn sanitize_filter(expression: &str) -> Result<()> {
    for pattern in DENIED_FILTER_PATTERNS {
        let re = Regex::new(&format!("(?i){}", pattern)).unwrap();
        if re.is_match(expression) {
            return Err(ToolError::unsafe_expression(format!(
                "filter matches denied pattern '{}'",
                pattern
            )));
        }
    }

    Ok(())
}
