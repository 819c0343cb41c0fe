mod execute;
mod output;

use clap::Args;

/// Execute a SQL query and print the returned rows
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  questdb execute-query -q 'SELECT id, name FROM product WHERE id < 40'
  questdb execute-query -q 'SELECT * FROM trades LIMIT 10' --format json")]
pub struct ExecuteQueryCmd {
    /// The SQL query to execute (sent to the database unchanged)
    #[arg(short, long)]
    pub query: String,
}
