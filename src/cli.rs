//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and shared types.
//! Individual command definitions are in the `commands` module.

use clap::Parser;
use std::path::PathBuf;

use crate::commands::Command;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a JSON file with QuestDB credentials (default: ./.questdb.json, then QUESTDB_* env)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_config_is_optional() {
        let args = Args::try_parse_from(["questdb", "execute-query", "-q", "SELECT 1"]).unwrap();
        assert!(args.config.is_none());
        assert!(matches!(args.format, OutputFormat::Table));
    }

    #[rstest]
    fn test_global_config_after_subcommand() {
        let args = Args::try_parse_from([
            "questdb",
            "insert",
            "-t",
            "product",
            "--config",
            "/etc/questdb.json",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/etc/questdb.json")));
    }

    #[rstest]
    #[case("table")]
    #[case("json")]
    #[case("toon")]
    fn test_format_values(#[case] format: &str) {
        let result = Args::try_parse_from(["questdb", "--format", format, "execute-query", "-q", "x"]);
        assert!(result.is_ok());
    }

    #[rstest]
    fn test_invalid_format_rejected() {
        let result = Args::try_parse_from(["questdb", "--format", "xml", "execute-query", "-q", "x"]);
        assert!(result.is_err());
    }
}
