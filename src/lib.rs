//! # resource-tools
//!
//! Validated SQLite query and scoped file access tools for request/response
//! dispatch layers.
//!
//! This crate provides a small set of tool handlers, each mapping one
//! caller-supplied request mapping to one uniform result envelope: querying
//! rows, fetching a table schema, collecting per-table row counts, and
//! reading or writing text files inside a fixed base directory.
//!
//! ## Features
//!
//! - **Typed Requests**: each operation has a strongly-typed request with
//!   defaults, parsed from JSON at the handler boundary
//! - **Identifier Validation**: table and column names are checked against a
//!   safe-identifier grammar and quoted before interpolation
//! - **Filter Screening**: free-text WHERE expressions are screened against
//!   a denylist of destructive statements (a heuristic layer, not a
//!   substitute for parameterized queries)
//! - **Scoped File Access**: file names are confined to a base directory
//!   with an extension allow-list and a size cap; traversal attempts are
//!   rejected outright
//! - **Uniform Envelopes**: every outcome, including internal failures,
//!   becomes `{status, data | error}`; no error crosses the boundary
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use resource_tools::{QueryRequest, ToolConfig, Toolbox, WriteFileRequest};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let config = ToolConfig::builder("./data/example.db", "./data/files").build();
//!     let toolbox = Toolbox::new(config);
//!
//!     // Typed operations return Result
//!     let data = toolbox
//!         .query_rows(&QueryRequest::new("users").columns("id,name").limit(10))
//!         .await;
//!
//!     // Envelope handlers never fail
//!     let response = toolbox
//!         .handle_write_file(&serde_json::json!({
//!             "file_path": "notes.txt",
//!             "content": "hello"
//!         }))
//!         .await;
//!     assert!(response.is_success() || response.is_error());
//!     let _ = data;
//! }
//! ```
//!
//! ## Configuration
//!
//! The tools are configured once at startup using [`ToolConfig`]:
//!
//! ```rust
//! use resource_tools::ToolConfig;
//!
//! let config = ToolConfig::builder("./data/example.db", "./data/files")
//!     .max_query_rows(1000)                // Row-result cap (default 1000)
//!     .max_file_size(10 * 1024 * 1024)     // File size cap (default 10 MiB)
//!     .allowed_extensions([".txt", ".md"]) // Extension allow-list
//!     .build();
//! ```
//!
//! ## Concurrency
//!
//! Each handler invocation owns its own database session, opened and closed
//! around exactly one logical operation. The only shared state is the
//! read-only configuration, so a single [`Toolbox`] can be shared freely by
//! a dispatch layer.

pub mod config;
pub mod error;
pub mod files;
pub mod request;
pub mod response;
pub mod session;
pub mod sql;
pub mod tools;

// Re-export main types for convenience
pub use config::{ToolConfig, ToolConfigBuilder};
pub use error::{Result, ToolError};
pub use request::{
    QueryRequest, ReadFileRequest, SchemaRequest, StatsRequest, ToolRequest, WriteFileRequest,
};
pub use response::{
    ColumnInfo, QueryData, ReadFileData, SchemaData, StatsData, Status, TableCount, ToolResponse,
    WriteFileData,
};
pub use session::DbSession;
pub use tools::Toolbox;

// Re-export SQL utilities for advanced users
pub use sql::sanitize::{quote_identifier, sanitize_filter, validate_columns, validate_identifier};
