//! Result envelope and operation payloads
//!
//! Every handler returns the same envelope shape: `status` plus exactly one
//! of `data` (success) or `error` (failure). Callers never see a raw error.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::ToolError;

/// Outcome discriminator of a [`ToolResponse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Uniform response envelope returned by every handler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResponse {
    /// Build a success envelope from an operation payload
    pub fn success(data: impl Serialize) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => Self {
                status: Status::Success,
                data: Some(value),
                error: None,
            },
            Err(e) => Self::failure(&ToolError::Json(e)),
        }
    }

    /// Build an error envelope from a tool error
    pub fn failure(error: &ToolError) -> Self {
        Self {
            status: Status::Error,
            data: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }
}

/// Payload of a successful row query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryData {
    /// The executed SELECT statement
    pub query: String,
    /// Matching rows as column-name to value mappings, in result order
    pub results: Vec<IndexMap<String, JsonValue>>,
    /// Number of rows returned
    pub count: usize,
    /// Column names of the result set
    pub columns: Vec<String>,
}

/// One column descriptor in a table schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    pub not_null: bool,
    pub default_value: Option<JsonValue>,
    pub primary_key: bool,
}

/// Payload of a successful schema fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaData {
    pub table: String,
    pub columns: Vec<ColumnInfo>,
    pub column_count: usize,
}

/// Row count of one table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCount {
    pub table: String,
    pub row_count: i64,
}

/// Payload of a successful statistics fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsData {
    pub total_tables: usize,
    pub tables: Vec<TableCount>,
}

/// Payload of a successful file read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadFileData {
    pub content: String,
    pub path: String,
    /// Size of the decoded content in bytes
    pub size: u64,
    pub encoding: String,
}

/// Payload of a successful file write
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteFileData {
    pub path: String,
    /// Size of the encoded content in bytes
    pub size: u64,
    pub encoding: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let response = ToolResponse::success(json!({"count": 2}));

        assert!(response.is_success());
        assert!(response.data.is_some());
        assert!(response.error.is_none());

        let serialized = serde_json::to_value(&response).unwrap();
        assert_eq!(serialized["status"], "success");
        assert_eq!(serialized["data"]["count"], 2);
        assert!(serialized.get("error").is_none());
    }

    #[test]
    fn test_error_envelope_shape() {
        let response = ToolResponse::failure(&ToolError::table_not_found("users"));

        assert!(response.is_error());
        assert!(response.data.is_none());

        let serialized = serde_json::to_value(&response).unwrap();
        assert_eq!(serialized["status"], "error");
        assert_eq!(serialized["error"], "Table not found: users");
        assert!(serialized.get("data").is_none());
    }

    #[test]
    fn test_query_data_serializes_in_order() {
        let mut row = IndexMap::new();
        row.insert("id".to_string(), json!(1));
        row.insert("name".to_string(), json!("Alice"));

        let data = QueryData {
            query: "SELECT \"id\", \"name\" FROM \"users\" LIMIT 100".to_string(),
            results: vec![row],
            count: 1,
            columns: vec!["id".to_string(), "name".to_string()],
        };

        let serialized = serde_json::to_string(&data).unwrap();
        // Column order survives serialization
        assert!(serialized.find("\"id\"").unwrap() < serialized.find("\"name\"").unwrap());
    }
}
