//! Shared test utilities for node, query and command tests.
//!
//! `RecordingConnector` stands in for a database: it records every open,
//! close and submitted statement, and answers every query with a fixed set of
//! rows.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::db::{ConnectionConfig, Connector, DatabaseBackend, DbError};
use crate::types::Record;

/// A statement as it reached the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    Query(String),
    Batch(String),
}

/// Everything a `RecordingConnector` has observed.
#[derive(Debug, Clone, Default)]
pub struct ConnectionLog {
    pub opens: usize,
    pub closes: usize,
    pub configs: Vec<ConnectionConfig>,
    pub submitted: Vec<Submitted>,
}

#[derive(Debug, Clone, Default)]
struct Behavior {
    rows: Vec<Record>,
    fail_open: bool,
    fail_close: bool,
    fail_batch: Option<String>,
}

/// Connector whose connections record what they are asked to do.
#[derive(Debug, Clone, Default)]
pub struct RecordingConnector {
    log: Rc<RefCell<ConnectionLog>>,
    behavior: Behavior,
}

impl RecordingConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows returned by every query.
    pub fn with_rows(mut self, rows: Vec<Record>) -> Self {
        self.behavior.rows = rows;
        self
    }

    pub fn failing_open(mut self) -> Self {
        self.behavior.fail_open = true;
        self
    }

    pub fn failing_close(mut self) -> Self {
        self.behavior.fail_close = true;
        self
    }

    /// Make every batch submission fail with the given driver message.
    pub fn failing_batch(mut self, message: &str) -> Self {
        self.behavior.fail_batch = Some(message.to_string());
        self
    }

    /// Snapshot of the log so far.
    pub fn log(&self) -> ConnectionLog {
        self.log.borrow().clone()
    }
}

impl Connector for RecordingConnector {
    fn open(&self, config: ConnectionConfig) -> Result<Box<dyn DatabaseBackend>, DbError> {
        let mut log = self.log.borrow_mut();
        log.opens += 1;

        if self.behavior.fail_open {
            return Err(DbError::ConnectFailed {
                host: config.host,
                port: config.port,
                message: "connection refused".to_string(),
            });
        }

        log.configs.push(config);
        Ok(Box::new(RecordingBackend {
            log: Rc::clone(&self.log),
            behavior: self.behavior.clone(),
        }))
    }
}

struct RecordingBackend {
    log: Rc<RefCell<ConnectionLog>>,
    behavior: Behavior,
}

impl DatabaseBackend for RecordingBackend {
    fn execute_query(&mut self, sql: &str) -> Result<Vec<Record>, DbError> {
        self.log
            .borrow_mut()
            .submitted
            .push(Submitted::Query(sql.to_string()));
        Ok(self.behavior.rows.clone())
    }

    fn execute_batch(&mut self, sql: &str) -> Result<(), DbError> {
        self.log
            .borrow_mut()
            .submitted
            .push(Submitted::Batch(sql.to_string()));
        match &self.behavior.fail_batch {
            Some(message) => Err(DbError::QueryFailed {
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn backend_name(&self) -> &'static str {
        "Recording"
    }

    fn close(self: Box<Self>) -> Result<(), DbError> {
        self.log.borrow_mut().closes += 1;
        if self.behavior.fail_close {
            return Err(DbError::QueryFailed {
                message: "connection already closed".to_string(),
            });
        }
        Ok(())
    }
}

/// Build a record from a JSON object literal.
pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("record must be a JSON object, got {}", other),
    }
}
