//! Configuration for the tool handlers
//!
//! Provides a builder pattern for configuring the backing resources.

use std::path::PathBuf;

/// Default maximum number of rows a query may return
pub const DEFAULT_MAX_QUERY_ROWS: i64 = 1000;

/// Default maximum file size in bytes (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Default file extension allow-list
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[".txt", ".json", ".csv", ".md", ".py"];

/// Configuration for the tool handlers
///
/// Fixed at startup and read-only thereafter. Every handler invocation
/// reads from the same shared configuration.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Path to the SQLite database file
    pub database_path: PathBuf,
    /// Base directory for file read/write operations
    pub files_dir: PathBuf,
    /// Maximum number of rows a query may return (default: 1000)
    pub max_query_rows: i64,
    /// Maximum file size in bytes for reads and writes (default: 10 MiB)
    pub max_file_size: u64,
    /// Allowed file extensions, with leading dot, lowercase
    pub allowed_extensions: Vec<String>,
}

impl ToolConfig {
    /// Create a new configuration builder
    pub fn builder(
        database_path: impl Into<PathBuf>,
        files_dir: impl Into<PathBuf>,
    ) -> ToolConfigBuilder {
        ToolConfigBuilder::new(database_path, files_dir)
    }

    /// Whether the given extension (with leading dot) is allowed
    pub fn extension_allowed(&self, extension: &str) -> bool {
        let extension = extension.to_lowercase();
        self.allowed_extensions.iter().any(|e| *e == extension)
    }
}

/// Builder for ToolConfig
#[derive(Debug)]
pub struct ToolConfigBuilder {
    database_path: PathBuf,
    files_dir: PathBuf,
    max_query_rows: i64,
    max_file_size: u64,
    allowed_extensions: Vec<String>,
}

impl ToolConfigBuilder {
    /// Create a new builder with the database path and files base directory
    pub fn new(database_path: impl Into<PathBuf>, files_dir: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            files_dir: files_dir.into(),
            max_query_rows: DEFAULT_MAX_QUERY_ROWS,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }

    /// Set the maximum number of rows a query may return (default: 1000)
    pub fn max_query_rows(mut self, max: i64) -> Self {
        self.max_query_rows = max;
        self
    }

    /// Set the maximum file size in bytes (default: 10 MiB)
    pub fn max_file_size(mut self, max: u64) -> Self {
        self.max_file_size = max;
        self
    }

    /// Replace the extension allow-list
    ///
    /// Extensions are normalized to lowercase with a leading dot.
    pub fn allowed_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_extensions = extensions
            .into_iter()
            .map(|e| normalize_extension(&e.into()))
            .collect();
        self
    }

    /// Add a single extension to the allow-list
    pub fn allow_extension(mut self, extension: impl Into<String>) -> Self {
        self.allowed_extensions
            .push(normalize_extension(&extension.into()));
        self
    }

    /// Build the configuration
    pub fn build(self) -> ToolConfig {
        ToolConfig {
            database_path: self.database_path,
            files_dir: self.files_dir,
            max_query_rows: self.max_query_rows,
            max_file_size: self.max_file_size,
            allowed_extensions: self.allowed_extensions,
        }
    }
}

fn normalize_extension(extension: &str) -> String {
    let extension = extension.to_lowercase();
    if extension.starts_with('.') {
        extension
    } else {
        format!(".{}", extension)
    }
}
