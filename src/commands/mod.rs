//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - An `Execute` impl that runs the node and wraps its output
//! - An `Outputable` impl for table/JSON/toon rendering

mod execute_query;
mod insert;

pub use execute_query::ExecuteQueryCmd;
pub use insert::InsertCmd;

use clap::Subcommand;
use serde::Serialize;
use std::error::Error;

use crate::db::{Connector, Credential, DbError};
use crate::node::{self, NodeParameters, StaticContext};
use crate::output::{format_rows, OutputFormat, Outputable};
use crate::types::{NodeOutput, Record};

/// What the CLI provides to the node in place of a host platform.
pub struct HostContext {
    pub credentials: Option<Credential>,
    pub connector: Box<dyn Connector>,
}

impl HostContext {
    pub fn new(credentials: Option<Credential>, connector: Box<dyn Connector>) -> Self {
        Self {
            credentials,
            connector,
        }
    }

    /// Run the node with the given parameters and input items.
    pub fn run_node(
        &self,
        parameters: NodeParameters,
        items: Vec<Record>,
    ) -> Result<NodeOutput, DbError> {
        let ctx = StaticContext::new(self.credentials.clone(), parameters, items);
        node::execute(&ctx, self.connector.as_ref())
    }
}

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, host: &HostContext) -> Result<Self::Output, Box<dyn Error>>;
}

/// Output of an operation run by name rather than through a dedicated command.
#[derive(Debug, Serialize)]
pub struct OperationResult {
    pub operation: String,
    pub output: NodeOutput,
}

impl Outputable for OperationResult {
    fn to_table(&self) -> String {
        let rows: Vec<Record> = self
            .output
            .iter()
            .flatten()
            .map(|item| item.json.clone())
            .collect();

        let mut lines = vec![format!("Operation: {}", self.operation), String::new()];
        if rows.is_empty() {
            lines.push("No rows returned.".to_string());
        } else {
            lines.push(format!("Rows ({}):", rows.len()));
            lines.extend(format_rows(&rows).into_iter().map(|line| format!("  {}", line)));
        }
        lines.join("\n")
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute a SQL query and print the returned rows
    ExecuteQuery(ExecuteQueryCmd),

    /// Insert JSON records into a table and print the table's rows
    Insert(InsertCmd),

    /// Any other name is passed to the node as an operation name
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(self, host: &HostContext, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        match self {
            Command::ExecuteQuery(cmd) => {
                let result = cmd.execute(host)?;
                Ok(result.format(format))
            }
            Command::Insert(cmd) => {
                let result = cmd.execute(host)?;
                Ok(result.format(format))
            }
            Command::Unknown(args) => {
                let operation = args.into_iter().next().unwrap_or_default();
                let output = host.run_node(
                    NodeParameters {
                        operation: operation.clone(),
                        ..Default::default()
                    },
                    Vec::new(),
                )?;
                let result = OperationResult { operation, output };
                Ok(result.format(format))
            }
        }
    }
}
