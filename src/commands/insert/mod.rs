mod cli_tests;
mod execute;
mod output;

use std::path::PathBuf;

use clap::Args;

/// Insert JSON records into a table and print the table's rows
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  questdb insert -t product -i rows.json          # Insert records from a file
  cat rows.json | questdb insert -t product       # Insert records from stdin
  questdb insert -t product -r 'id,name' -i rows.json

Input is a JSON array of objects, or of {\"json\": {...}} items as printed
by `--format json`. Values are written into the SQL text as-is.")]
pub struct InsertCmd {
    /// Table to insert into
    #[arg(short, long)]
    pub table: String,

    /// Columns returned by the SELECT that follows the insert
    #[arg(short, long, default_value = "*")]
    pub return_fields: String,

    /// JSON file with the records to insert ('-' or omitted reads stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}
