//! Tool handlers
//!
//! The main [`Toolbox`] struct composes the validators, the database
//! session, and the scoped file helpers into one request/response cycle per
//! operation. Typed operations return `Result`; the `handle_*` wrappers
//! convert every outcome into the uniform envelope so no error crosses the
//! handler boundary.

use serde::Serialize;
use serde_json::Value as JsonValue;
use sqlx::{Column, Row};
use tracing::{error, info, warn};

use crate::config::ToolConfig;
use crate::error::{Result, ToolError};
use crate::files;
use crate::request::{
    QueryRequest, ReadFileRequest, SchemaRequest, StatsRequest, ToolRequest, WriteFileRequest,
};
use crate::response::{
    ColumnInfo, QueryData, ReadFileData, SchemaData, StatsData, TableCount, ToolResponse,
    WriteFileData,
};
use crate::session::DbSession;
use crate::sql::{
    quote_identifier, row_to_json, sanitize_filter, validate_columns, validate_identifier,
};

/// Validated SQLite query and scoped file access tools
///
/// Holds only the read-only configuration; every operation opens its own
/// database session or touches its own file, so a single `Toolbox` can be
/// shared by a dispatch layer across invocations.
pub struct Toolbox {
    config: ToolConfig,
}

impl Toolbox {
    /// Create a toolbox from configuration
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    // =========================================================================
    // Database Operations
    // =========================================================================

    /// Select rows from a table with validated identifiers and a screened
    /// filter expression
    pub async fn query_rows(&self, request: &QueryRequest) -> Result<QueryData> {
        validate_identifier(&request.table)?;
        validate_columns(&request.columns)?;

        let filter = request
            .where_clause
            .as_deref()
            .map(str::trim)
            .filter(|w| !w.is_empty());
        if let Some(expression) = filter {
            sanitize_filter(expression)?;
        }

        let mut limit = request.limit;
        if limit > self.config.max_query_rows {
            warn!(
                requested = limit,
                max = self.config.max_query_rows,
                "query limit reduced to maximum"
            );
            limit = self.config.max_query_rows;
        }
        if limit < 0 {
            limit = 0;
        }

        let column_sql = if request.columns == "*" {
            "*".to_string()
        } else {
            request
                .columns
                .split(',')
                .map(|c| quote_identifier(c.trim()))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut query = format!(
            "SELECT {} FROM {}",
            column_sql,
            quote_identifier(&request.table)
        );
        if let Some(expression) = filter {
            query.push_str(" WHERE ");
            query.push_str(expression);
        }
        query.push_str(&format!(" LIMIT {}", limit));

        let mut session = DbSession::open(&self.config.database_path).await?;
        let fetched = session.fetch_all(&query).await;
        session.close().await;
        let rows = fetched?;

        // sqlx rows only carry column metadata when the result set is
        // non-empty; fall back to the validated request columns
        let columns: Vec<String> = match rows.first() {
            Some(first) => first.columns().iter().map(|c| c.name().to_string()).collect(),
            None if request.columns == "*" => Vec::new(),
            None => request
                .columns
                .split(',')
                .map(|c| c.trim().to_string())
                .collect(),
        };

        let results = rows.iter().map(row_to_json).collect::<Result<Vec<_>>>()?;
        let count = results.len();

        info!(table = %request.table, count, "query executed");
        Ok(QueryData {
            query,
            results,
            count,
            columns,
        })
    }

    /// Fetch the column descriptors of a table
    pub async fn fetch_schema(&self, request: &SchemaRequest) -> Result<SchemaData> {
        validate_identifier(&request.table)?;

        let schema_query = format!("PRAGMA table_info({})", quote_identifier(&request.table));

        let mut session = DbSession::open(&self.config.database_path).await?;
        let fetched = session.fetch_all(&schema_query).await;
        session.close().await;
        let rows = fetched?;

        if rows.is_empty() {
            return Err(ToolError::table_not_found(&request.table));
        }

        let columns = rows
            .iter()
            .map(|row| -> Result<ColumnInfo> {
                Ok(ColumnInfo {
                    name: row.try_get::<String, _>("name")?,
                    column_type: row.try_get::<String, _>("type")?,
                    not_null: row.try_get::<i64, _>("notnull")? != 0,
                    default_value: row
                        .try_get::<Option<String>, _>("dflt_value")?
                        .map(JsonValue::String),
                    primary_key: row.try_get::<i64, _>("pk")? != 0,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!(table = %request.table, columns = columns.len(), "schema retrieved");
        Ok(SchemaData {
            table: request.table.clone(),
            column_count: columns.len(),
            columns,
        })
    }

    /// Fetch per-table row counts across the whole database
    ///
    /// Table names come from the database catalog, not caller input, so no
    /// identifier validation is applied to them.
    pub async fn fetch_statistics(&self, _request: &StatsRequest) -> Result<StatsData> {
        let mut session = DbSession::open(&self.config.database_path).await?;
        let collected = Self::collect_statistics(&mut session).await;
        session.close().await;
        let tables = collected?;

        info!(tables = tables.len(), "statistics retrieved");
        Ok(StatsData {
            total_tables: tables.len(),
            tables,
        })
    }

    async fn collect_statistics(session: &mut DbSession) -> Result<Vec<TableCount>> {
        let rows = session
            .fetch_all("SELECT name FROM sqlite_master WHERE type = 'table'")
            .await?;

        let mut tables = Vec::new();
        for row in &rows {
            let name: String = row.try_get("name")?;
            let count_query = format!("SELECT COUNT(*) FROM {}", quote_identifier(&name));
            let count_row = session.fetch_optional(&count_query).await?;
            let row_count: i64 = match count_row {
                Some(row) => row.try_get(0)?,
                None => 0,
            };
            tables.push(TableCount {
                table: name,
                row_count,
            });
        }

        Ok(tables)
    }

    // =========================================================================
    // File Operations
    // =========================================================================

    /// Read a file from the configured base directory
    pub async fn read_file(&self, request: &ReadFileRequest) -> Result<ReadFileData> {
        files::validate_encoding(&request.encoding)?;
        let path = files::validate_file_path(&request.file_path, &self.config)?;

        let bytes = files::read_file(&path, self.config.max_file_size).await?;
        let content = String::from_utf8(bytes).map_err(|e| {
            ToolError::Encoding(format!("invalid utf-8 in {}: {}", request.file_path, e))
        })?;

        info!(path = %path.display(), "file read");
        Ok(ReadFileData {
            size: content.len() as u64,
            path: path.display().to_string(),
            content,
            encoding: request.encoding.clone(),
        })
    }

    /// Write a file into the configured base directory
    pub async fn write_file(&self, request: &WriteFileRequest) -> Result<WriteFileData> {
        files::validate_encoding(&request.encoding)?;
        let path = files::validate_file_path(&request.file_path, &self.config)?;

        let bytes = request.content.as_bytes();
        if bytes.len() as u64 > self.config.max_file_size {
            return Err(ToolError::FileTooLarge {
                size: bytes.len() as u64,
                max: self.config.max_file_size,
            });
        }

        files::write_file(&path, bytes).await?;

        info!(path = %path.display(), size = bytes.len(), "file written");
        Ok(WriteFileData {
            path: path.display().to_string(),
            size: bytes.len() as u64,
            encoding: request.encoding.clone(),
        })
    }

    // =========================================================================
    // Envelope Handlers
    // =========================================================================

    /// Handle a row-query request mapping
    pub async fn handle_query_rows(&self, request: &JsonValue) -> ToolResponse {
        match QueryRequest::from_value(request) {
            Ok(parsed) => respond(self.query_rows(&parsed).await),
            Err(e) => reject(e),
        }
    }

    /// Handle a schema request mapping
    pub async fn handle_fetch_schema(&self, request: &JsonValue) -> ToolResponse {
        match SchemaRequest::from_value(request) {
            Ok(parsed) => respond(self.fetch_schema(&parsed).await),
            Err(e) => reject(e),
        }
    }

    /// Handle a statistics request mapping
    pub async fn handle_fetch_statistics(&self, request: &JsonValue) -> ToolResponse {
        match StatsRequest::from_value(request) {
            Ok(parsed) => respond(self.fetch_statistics(&parsed).await),
            Err(e) => reject(e),
        }
    }

    /// Handle a file-read request mapping
    pub async fn handle_read_file(&self, request: &JsonValue) -> ToolResponse {
        match ReadFileRequest::from_value(request) {
            Ok(parsed) => respond(self.read_file(&parsed).await),
            Err(e) => reject(e),
        }
    }

    /// Handle a file-write request mapping
    pub async fn handle_write_file(&self, request: &JsonValue) -> ToolResponse {
        match WriteFileRequest::from_value(request) {
            Ok(parsed) => respond(self.write_file(&parsed).await),
            Err(e) => reject(e),
        }
    }

    /// Route a typed request to its operation
    pub async fn dispatch(&self, request: &ToolRequest) -> ToolResponse {
        match request {
            ToolRequest::QueryRows(r) => respond(self.query_rows(r).await),
            ToolRequest::FetchSchema(r) => respond(self.fetch_schema(r).await),
            ToolRequest::FetchStatistics(r) => respond(self.fetch_statistics(r).await),
            ToolRequest::ReadFile(r) => respond(self.read_file(r).await),
            ToolRequest::WriteFile(r) => respond(self.write_file(r).await),
        }
    }

    /// Parse a tagged request mapping and route it
    pub async fn handle(&self, request: &JsonValue) -> ToolResponse {
        match ToolRequest::from_value(request) {
            Ok(parsed) => self.dispatch(&parsed).await,
            Err(e) => reject(e),
        }
    }
}

fn respond<T: Serialize>(result: Result<T>) -> ToolResponse {
    match result {
        Ok(data) => ToolResponse::success(data),
        Err(e) => {
            error!(error = %e, "operation failed");
            ToolResponse::failure(&e)
        }
    }
}

fn reject(e: ToolError) -> ToolResponse {
    error!(error = %e, "invalid request");
    ToolResponse::failure(&e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn seeded_toolbox(temp: &TempDir, max_rows: i64) -> Toolbox {
        let db_path = temp.path().join("test.db");
        let files_dir = temp.path().join("files");

        let mut session = DbSession::open(&db_path).await.unwrap();
        session
            .fetch_all("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL)")
            .await
            .unwrap();
        for (id, name) in [(1, "Alice"), (2, "Bob"), (3, "Charlie")] {
            session
                .fetch_all(&format!("INSERT INTO users VALUES ({}, '{}')", id, name))
                .await
                .unwrap();
        }
        session.close().await;

        Toolbox::new(
            ToolConfig::builder(db_path, files_dir)
                .max_query_rows(max_rows)
                .build(),
        )
    }

    #[tokio::test]
    async fn test_query_limit_clamped_to_configured_maximum() {
        let temp = TempDir::new().unwrap();
        let toolbox = seeded_toolbox(&temp, 2).await;

        let data = toolbox
            .query_rows(&QueryRequest::new("users").limit(100))
            .await
            .unwrap();

        assert_eq!(data.count, 2);
        assert!(data.query.ends_with("LIMIT 2"));
    }

    #[tokio::test]
    async fn test_query_negative_limit_returns_nothing() {
        let temp = TempDir::new().unwrap();
        let toolbox = seeded_toolbox(&temp, 1000).await;

        let data = toolbox
            .query_rows(&QueryRequest::new("users").limit(-5))
            .await
            .unwrap();

        assert_eq!(data.count, 0);
    }

    #[tokio::test]
    async fn test_query_empty_result_echoes_requested_columns() {
        let temp = TempDir::new().unwrap();
        let toolbox = seeded_toolbox(&temp, 1000).await;

        let data = toolbox
            .query_rows(&QueryRequest::new("users").columns("id,name").filter("id > 100"))
            .await
            .unwrap();

        assert_eq!(data.count, 0);
        assert_eq!(data.columns, vec!["id", "name"]);
    }

    #[tokio::test]
    async fn test_query_rejects_bad_identifiers_before_touching_database() {
        let temp = TempDir::new().unwrap();
        let toolbox = seeded_toolbox(&temp, 1000).await;

        let result = toolbox.query_rows(&QueryRequest::new("users; DROP")).await;
        assert!(matches!(result, Err(ToolError::InvalidIdentifier(_))));

        let result = toolbox
            .query_rows(&QueryRequest::new("users").filter("1=1; DROP TABLE users"))
            .await;
        assert!(matches!(result, Err(ToolError::UnsafeExpression(_))));

        // The screened statement never ran
        let data = toolbox.query_rows(&QueryRequest::new("users")).await.unwrap();
        assert_eq!(data.count, 3);
    }
}
