//! questdb_connector library - QuestDB node for a workflow host
//!
//! Runs SQL queries and batch inserts against QuestDB over its Postgres wire
//! protocol, and provides the command execution and output formatting used by
//! the `questdb` CLI host.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod node;
pub mod output;
pub mod types;

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod test_utils;
