//! Database session management
//!
//! A session owns exactly one SQLite connection for the duration of one
//! logical operation: open, execute, close. Sessions are never pooled and
//! never shared across handler invocations.

use std::path::Path;

use sqlx::Connection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use tracing::{debug, warn};

use crate::error::{Result, ToolError};

/// One open connection to the backing SQLite database.
///
/// Consumed by [`DbSession::close`], so a closed session cannot be reused.
pub struct DbSession {
    conn: SqliteConnection,
}

impl DbSession {
    /// Open a connection to the database at the given path
    ///
    /// Creates the database file if it does not exist and enables foreign
    /// key enforcement. Connection failures are propagated, not retried.
    pub async fn open(database_path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .foreign_keys(true);

        let conn = SqliteConnection::connect_with(&options)
            .await
            .map_err(|e| ToolError::connection(format!("database connection failed: {}", e)))?;

        debug!(path = %database_path.display(), "database session opened");
        Ok(Self { conn })
    }

    /// Execute a query and return all matching rows
    pub async fn fetch_all(&mut self, sql: &str) -> Result<Vec<SqliteRow>> {
        sqlx::query(sql)
            .fetch_all(&mut self.conn)
            .await
            .map_err(Into::into)
    }

    /// Execute a query and return a single optional row
    pub async fn fetch_optional(&mut self, sql: &str) -> Result<Option<SqliteRow>> {
        sqlx::query(sql)
            .fetch_optional(&mut self.conn)
            .await
            .map_err(Into::into)
    }

    /// Close the session, releasing the underlying connection
    ///
    /// Close failures are logged and swallowed: the operation outcome has
    /// already been decided by the time the session is released.
    pub async fn close(self) {
        if let Err(e) = self.conn.close().await {
            warn!(error = %e, "failed to close database session");
        } else {
            debug!("database session closed");
        }
    }
}
