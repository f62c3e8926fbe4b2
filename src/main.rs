//! tzdb CLI - build tzdb.dat from the IANA time-zone database
//!
//! Entry point for the tzdb command-line application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tzdb_builder::cli::output::{display_error, OutputConfig};
use tzdb_builder::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output_config = OutputConfig::new(cli.quiet, cli.json, cli.verbose);

    // RUST_LOG takes precedence over -v
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(output_config.log_directive())),
        )
        .init();

    output_config.apply_global();

    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
