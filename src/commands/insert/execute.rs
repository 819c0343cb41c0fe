use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde::Serialize;

use super::InsertCmd;
use crate::commands::{Execute, HostContext};
use crate::db::DbError;
use crate::node::{NodeParameters, Operation};
use crate::types::{records_from_json, NodeOutput, Record};

/// Result of the insert command
#[derive(Debug, Serialize)]
pub struct InsertResult {
    pub table: String,
    pub inserted: usize,
    pub output: NodeOutput,
}

/// Read the input batch from a file, or from stdin for `None` / `-`.
fn read_records(input: Option<&Path>) -> Result<Vec<Record>, DbError> {
    let text = match input {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).map_err(|e| DbError::InvalidInput {
                message: format!("Failed to read {}: {}", path.display(), e),
            })?
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| DbError::InvalidInput {
                    message: format!("Failed to read stdin: {}", e),
                })?;
            buf
        }
    };
    records_from_json(&text)
}

impl Execute for InsertCmd {
    type Output = InsertResult;

    fn execute(self, host: &HostContext) -> Result<Self::Output, Box<dyn Error>> {
        let records = read_records(self.input.as_deref())?;
        let inserted = records.len();

        let parameters = NodeParameters {
            operation: Operation::Insert.to_string(),
            table: Some(self.table.clone()),
            return_fields: Some(self.return_fields),
            ..Default::default()
        };
        let output = host.run_node(parameters, records)?;

        Ok(InsertResult {
            table: self.table,
            inserted,
            output,
        })
    }
}
