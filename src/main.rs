use clap::Parser;
use tracing_subscriber::EnvFilter;

use questdb_connector::cli::Args;
use questdb_connector::commands::HostContext;
use questdb_connector::config::resolve_credentials;
use questdb_connector::db::postgres::PostgresConnector;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let credentials = resolve_credentials(args.config.as_deref())?;
    let host = HostContext::new(credentials, Box::new(PostgresConnector));
    let output = args.command.run(&host, args.format)?;
    println!("{}", output);
    Ok(())
}
