//! Output formatting for insert command results.

use crate::output::{format_rows, Outputable};
use crate::types::Record;
use super::execute::InsertResult;

impl Outputable for InsertResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "Insert into {}: {} record(s) submitted",
            self.table, self.inserted
        ));
        lines.push(String::new());

        let rows: Vec<Record> = self
            .output
            .iter()
            .flatten()
            .map(|item| item.json.clone())
            .collect();

        if rows.is_empty() {
            lines.push(format!("Table {} is empty.", self.table));
            return lines.join("\n");
        }

        lines.push(format!("Rows in {} ({}):", self.table, rows.len()));
        for line in format_rows(&rows) {
            lines.push(format!("  {}", line));
        }

        lines.join("\n")
    }
}
