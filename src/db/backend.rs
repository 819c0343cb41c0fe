//! Driver abstraction used by the operation executor.
//!
//! The executor never talks to a wire protocol directly. It opens a
//! connection through a `Connector`, runs statements through the returned
//! `DatabaseBackend`, and closes it when done.

use super::{ConnectionConfig, DbError};
use crate::types::Record;

/// A live database connection.
pub trait DatabaseBackend {
    /// Execute a single statement and return every row it produces.
    ///
    /// Rows are normalized into records keyed by column name, in column order.
    fn execute_query(&mut self, sql: &str) -> Result<Vec<Record>, DbError>;

    /// Submit one or more `;`-separated statements as a single request.
    ///
    /// The driver either runs the whole command or reports one combined
    /// failure; there is no per-statement result.
    fn execute_batch(&mut self, sql: &str) -> Result<(), DbError>;

    /// Get the backend name for logging/debugging.
    fn backend_name(&self) -> &'static str;

    /// Close the connection, consuming it.
    fn close(self: Box<Self>) -> Result<(), DbError>;
}

/// Opens connections from a `ConnectionConfig`.
pub trait Connector {
    /// Open a connection. The config is consumed; every invocation builds its own.
    fn open(&self, config: ConnectionConfig) -> Result<Box<dyn DatabaseBackend>, DbError>;
}
