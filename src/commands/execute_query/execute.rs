use std::error::Error;

use serde::Serialize;

use super::ExecuteQueryCmd;
use crate::commands::{Execute, HostContext};
use crate::node::{NodeParameters, Operation};
use crate::types::NodeOutput;

/// Result of the execute-query command
#[derive(Debug, Serialize)]
pub struct ExecuteQueryResult {
    pub query: String,
    pub output: NodeOutput,
}

impl Execute for ExecuteQueryCmd {
    type Output = ExecuteQueryResult;

    fn execute(self, host: &HostContext) -> Result<Self::Output, Box<dyn Error>> {
        let parameters = NodeParameters {
            operation: Operation::ExecuteQuery.to_string(),
            query: Some(self.query.clone()),
            ..Default::default()
        };
        let output = host.run_node(parameters, Vec::new())?;

        Ok(ExecuteQueryResult {
            query: self.query,
            output,
        })
    }
}
