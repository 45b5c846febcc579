//! Typed tool requests
//!
//! Each operation has its own request type with strongly-typed required and
//! optional fields, parsed from the caller's JSON mapping at the handler
//! boundary. A missing required field surfaces as `MissingParameter` naming
//! the field.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{Result, ToolError};

fn default_columns() -> String {
    "*".to_string()
}

fn default_limit() -> i64 {
    100
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

/// Request to query rows from a table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Table to select from
    pub table: String,
    /// Comma-separated column list, or `*` (default)
    #[serde(default = "default_columns")]
    pub columns: String,
    /// Free-text filter expression appended as a WHERE clause
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<String>,
    /// Maximum number of rows to return (default 100, capped at the
    /// configured maximum)
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl QueryRequest {
    /// Create a query request for a table with default columns and limit
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: default_columns(),
            where_clause: None,
            limit: default_limit(),
        }
    }

    /// Set the column list
    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    /// Set the filter expression
    pub fn filter(mut self, expression: impl Into<String>) -> Self {
        self.where_clause = Some(expression.into());
        self
    }

    /// Set the row limit
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Parse from a caller-supplied JSON mapping
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        parse_request(value)
    }
}

/// Request for a table's column descriptors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaRequest {
    /// Table to describe
    pub table: String,
}

impl SchemaRequest {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }

    /// Parse from a caller-supplied JSON mapping
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        parse_request(value)
    }
}

/// Request for per-table row counts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsRequest {}

impl StatsRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a caller-supplied JSON mapping
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        parse_request(value)
    }
}

/// Request to read a file from the configured base directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadFileRequest {
    /// File name within the base directory
    pub file_path: String,
    /// Text encoding (only UTF-8 is supported)
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

impl ReadFileRequest {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            encoding: default_encoding(),
        }
    }

    /// Set the encoding
    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Parse from a caller-supplied JSON mapping
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        parse_request(value)
    }
}

/// Request to write a file into the configured base directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteFileRequest {
    /// File name within the base directory
    pub file_path: String,
    /// Text content to write
    pub content: String,
    /// Text encoding (only UTF-8 is supported)
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

impl WriteFileRequest {
    pub fn new(file_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            content: content.into(),
            encoding: default_encoding(),
        }
    }

    /// Set the encoding
    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Parse from a caller-supplied JSON mapping
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        parse_request(value)
    }
}

/// Union of all tool requests, tagged by operation name
///
/// Intended for dispatch layers that route named operations:
/// `{"tool": "query_rows", "table": "users", "limit": 10}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolRequest {
    QueryRows(QueryRequest),
    FetchSchema(SchemaRequest),
    FetchStatistics(StatsRequest),
    ReadFile(ReadFileRequest),
    WriteFile(WriteFileRequest),
}

impl ToolRequest {
    /// Parse a tagged request from a caller-supplied JSON mapping
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        parse_request(value)
    }
}

fn parse_request<T: serde::de::DeserializeOwned>(value: &JsonValue) -> Result<T> {
    serde_json::from_value(value.clone()).map_err(map_parse_error)
}

/// Surface serde's missing-field failures as `MissingParameter` naming the
/// field; everything else (wrong types, malformed tags) stays a JSON error.
fn map_parse_error(e: serde_json::Error) -> ToolError {
    let message = e.to_string();
    if let Some(rest) = message.strip_prefix("missing field `") {
        if let Some(field) = rest.split('`').next() {
            return ToolError::missing_parameter(field);
        }
    }
    ToolError::Json(e)
}
