//! Database access layer for the QuestDB connector.
//!
//! This module holds everything between a host-supplied credential and the
//! rows that come back from the database:
//! - Connection configuration derived from credentials (`config`)
//! - The narrow driver interface the executor talks to (`backend`)
//! - Scoped connection handling with unconditional teardown (`connection`)
//! - SQL literal rendering and statement construction (`literal`, `query`)
//! - The PostgreSQL wire-protocol backend (`postgres`)
//!
//! # Type Decisions
//!
//! **Why `serde_json::Map` for records?**
//! Host records are loosely typed and may carry a different field set per row.
//! A JSON object with `preserve_order` keeps the natural field order, which
//! drives the column order of synthesized INSERT statements.
//!
//! **Why a trait for the driver?**
//! The executor only ever needs "run this and give me rows", "submit this
//! batch" and "close". Keeping that behind `DatabaseBackend` lets tests observe
//! the exact statements and the open/close cycle without a live database.

mod backend;
mod config;
mod connection;
mod literal;
pub mod postgres;
mod query;

pub use backend::{Connector, DatabaseBackend};
pub use config::{ConnectionConfig, Credential, SslMode};
pub use connection::with_connection;
pub use literal::render_literal;
pub use query::{
    build_insert, build_select, concat_statements, insert_records, run_query,
    DEFAULT_RETURN_FIELDS,
};

use thiserror::Error;

/// Database error types
#[derive(Error, Debug)]
pub enum DbError {
    #[error("No credentials got returned!")]
    MissingCredentials,

    #[error("Missing required parameter '{name}'")]
    MissingParameter { name: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid input data: {message}")]
    InvalidInput { message: String },

    #[error("Failed to connect to '{host}:{port}': {message}")]
    ConnectFailed {
        host: String,
        port: u16,
        message: String,
    },

    #[error("The operation \"{operation}\" is not supported!")]
    UnsupportedOperation { operation: String },

    #[error("Query failed: {message}")]
    QueryFailed { message: String },
}
