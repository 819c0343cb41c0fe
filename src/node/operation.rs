use std::fmt;
use std::str::FromStr;

use crate::db::DbError;

/// Operations the node can perform.
///
/// Names match the host's operation selector values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Run a caller-supplied SQL query and return its rows.
    ExecuteQuery,
    /// Insert the input items into a table and return the table's rows.
    Insert,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExecuteQuery => "executeQuery",
            Self::Insert => "insert",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "executeQuery" => Ok(Self::ExecuteQuery),
            "insert" => Ok(Self::Insert),
            other => Err(DbError::UnsupportedOperation {
                operation: other.to_string(),
            }),
        }
    }
}
