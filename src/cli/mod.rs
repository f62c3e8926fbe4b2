//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no pipeline logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use clap::Parser;

use crate::core::config::{ConfigFile, Settings};
use crate::infra::dirs::TzdbDirs;
use commands::Commands;

/// Long version string with build metadata when available
fn long_version() -> &'static str {
    static LONG_VERSION: OnceLock<String> = OnceLock::new();
    LONG_VERSION.get_or_init(|| {
        format!(
            "{} ({} {}, {})",
            env!("CARGO_PKG_VERSION"),
            option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
            option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown"),
            option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown"),
        )
    })
}

/// tzdb - build tzdb.dat from the IANA time-zone database
///
/// Downloads a tzdata release, compiles it with a zone-rules compiler,
/// and publishes tzdb.dat into a resources directory.
#[derive(Parser, Debug)]
#[command(name = "tzdb")]
#[command(author, version, long_version = long_version(), about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output the pipeline report in JSON format for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Project directory (defaults to the current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// tzdb release to build, e.g. 2021a
    #[arg(long, global = true, env = "TZDB_VERSION", value_name = "VERSION")]
    pub tzdb_version: Option<String>,

    /// Project config file (defaults to <project>/tzdb.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let Some(command) = self.command else {
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            return Ok(());
        };

        let project_dir = match self.project_dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };

        let config = ConfigFile::load_layers(&project_dir, self.config.as_deref(), &TzdbDirs::new())
            .context("Failed to load configuration")?;

        // Removing every release needs no version
        if let Commands::Clean { all: true } = command {
            return commands::clean::execute_all(&config.build_dir_in(&project_dir));
        }

        let settings = Settings::resolve(&project_dir, config, self.tzdb_version.as_deref())
            .context("Failed to load configuration")?;

        command.run(&settings).await
    }
}
