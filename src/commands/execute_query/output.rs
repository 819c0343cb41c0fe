//! Output formatting for execute-query command results.

use crate::output::{format_rows, Outputable};
use crate::types::Record;
use super::execute::ExecuteQueryResult;

impl Outputable for ExecuteQueryResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Query: {}", self.query));
        lines.push(String::new());

        let rows: Vec<Record> = self
            .output
            .iter()
            .flatten()
            .map(|item| item.json.clone())
            .collect();

        if rows.is_empty() {
            lines.push("No rows returned.".to_string());
            return lines.join("\n");
        }

        lines.push(format!("Rows ({}):", rows.len()));
        for line in format_rows(&rows) {
            lines.push(format!("  {}", line));
        }

        lines.join("\n")
    }
}
