//! SQL utilities for the query tools
//!
//! Provides identifier sanitization, filter-expression screening, and row
//! decoding helpers.

pub mod decode;
pub mod sanitize;

pub use decode::row_to_json;
pub use sanitize::{quote_identifier, sanitize_filter, validate_columns, validate_identifier};
