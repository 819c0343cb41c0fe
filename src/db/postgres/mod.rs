//! PostgreSQL wire-protocol backend.
//!
//! QuestDB speaks the PostgreSQL wire protocol, so the connector uses the
//! synchronous `postgres` client for both QuestDB and plain PostgreSQL. TLS is
//! provided by `rustls` through `tokio-postgres-rustls` when the connection
//! config asks for SSL.

mod conversion;
mod tls;

use std::error::Error as _;

use postgres::config::SslMode as DriverSslMode;
use postgres::types::Type;
use postgres::{Client, NoTls};
use tracing::{debug, info};

use super::backend::{Connector, DatabaseBackend};
use super::{ConnectionConfig, DbError, SslMode};
use crate::types::Record;

pub use conversion::{decodes_binary, records_from_simple, row_to_record};
pub use tls::make_tls_connector;

/// Opens `PostgresBackend` connections.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresConnector;

impl Connector for PostgresConnector {
    fn open(&self, config: ConnectionConfig) -> Result<Box<dyn DatabaseBackend>, DbError> {
        let backend = PostgresBackend::connect(config)?;
        Ok(Box::new(backend))
    }
}

/// A single client connection to a QuestDB or PostgreSQL server.
pub struct PostgresBackend {
    client: Client,
}

impl PostgresBackend {
    /// Connect using the given configuration.
    ///
    /// # Errors
    /// Returns `DbError::ConnectFailed` if the TLS connector cannot be built or
    /// the server cannot be reached or rejects the login.
    pub fn connect(config: ConnectionConfig) -> Result<Self, DbError> {
        let mode = config.tls_mode();
        let pg_config = driver_config(&config, mode);

        info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            ssl = config.ssl,
            "Connecting"
        );

        let connect_failed = |message: String| DbError::ConnectFailed {
            host: config.host.clone(),
            port: config.port,
            message,
        };

        let connected = if config.ssl {
            let tls = make_tls_connector(mode).map_err(connect_failed)?;
            pg_config.connect(tls)
        } else {
            pg_config.connect(NoTls)
        };
        let client = connected.map_err(|e| connect_failed(driver_message(&e)))?;

        Ok(Self { client })
    }
}

/// Translate a connection config into the driver's configuration.
fn driver_config(config: &ConnectionConfig, mode: SslMode) -> postgres::Config {
    let mut pg_config = postgres::Config::new();
    pg_config
        .host(&config.host)
        .port(config.port)
        .dbname(&config.database)
        .user(&config.user)
        .password(&config.password)
        .ssl_mode(driver_ssl_mode(mode));
    pg_config
}

/// Render a driver error with the server's own report when there is one.
///
/// The driver's `Display` only names the error kind ("db error"); the server
/// message and the underlying I/O cause live in the error's source.
fn driver_message(e: &postgres::Error) -> String {
    if let Some(db) = e.as_db_error() {
        let mut message = format!("{}: {} (SQLSTATE {})", db.severity(), db.message(), db.code().code());
        if let Some(detail) = db.detail() {
            message.push_str(&format!("\nDETAIL: {}", detail));
        }
        return message;
    }
    match e.source() {
        Some(cause) => format!("{}: {}", e, cause),
        None => e.to_string(),
    }
}

fn query_failed(e: postgres::Error) -> DbError {
    DbError::QueryFailed {
        message: driver_message(&e),
    }
}

fn driver_ssl_mode(mode: SslMode) -> DriverSslMode {
    match mode {
        SslMode::Disable => DriverSslMode::Disable,
        SslMode::Allow | SslMode::Prefer => DriverSslMode::Prefer,
        SslMode::Require | SslMode::VerifyCa | SslMode::VerifyFull => DriverSslMode::Require,
    }
}

impl PostgresBackend {
    /// Run SQL through the simple protocol, returning the last result set.
    fn simple_query(&mut self, sql: &str, types: Option<&[Type]>) -> Result<Vec<Record>, DbError> {
        let messages = self.client.simple_query(sql).map_err(query_failed)?;
        Ok(records_from_simple(&messages, types))
    }
}

impl DatabaseBackend for PostgresBackend {
    fn execute_query(&mut self, sql: &str) -> Result<Vec<Record>, DbError> {
        // Preparing does not execute, so either path below runs the SQL once.
        let statement = match self.client.prepare(sql) {
            Ok(statement) => statement,
            Err(e) => {
                debug!(error = %driver_message(&e), "Statement not preparable, using simple query");
                return self.simple_query(sql, None);
            }
        };

        let types: Vec<Type> = statement
            .columns()
            .iter()
            .map(|column| column.type_().clone())
            .collect();

        if types.iter().all(decodes_binary) {
            let rows = self.client.query(&statement, &[]).map_err(query_failed)?;
            Ok(rows.iter().map(row_to_record).collect())
        } else {
            debug!("Result has columns without a binary decoder, reading text");
            self.simple_query(sql, Some(&types))
        }
    }

    fn execute_batch(&mut self, sql: &str) -> Result<(), DbError> {
        self.client.batch_execute(sql).map_err(query_failed)
    }

    fn backend_name(&self) -> &'static str {
        "Postgres"
    }

    fn close(self: Box<Self>) -> Result<(), DbError> {
        self.client.close().map_err(|e| DbError::QueryFailed {
            message: format!("Failed to close connection: {}", driver_message(&e)),
        })
    }
}
