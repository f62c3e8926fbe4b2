//! CLI command implementations
//!
//! Each command is implemented in its own submodule. The four stage
//! commands share [`pipeline::execute`] and differ only in where the
//! pipeline stops.

pub mod clean;
pub mod paths;
pub mod pipeline;
pub mod url;

use anyhow::Result;
use clap::Subcommand;

use crate::core::config::Settings;
use crate::core::pipeline::Stage;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download the tzdata release archive
    Fetch {
        /// Re-download even if the archive is cached
        #[arg(short, long)]
        force: bool,
    },

    /// Download and unpack the release
    Unpack {
        /// Re-download even if the archive is cached
        #[arg(short, long)]
        force: bool,
    },

    /// Download, unpack, and compile the release into TZDB.dat
    Compile {
        /// Re-download even if the archive is cached
        #[arg(short, long)]
        force: bool,
    },

    /// Run the full pipeline and publish tzdb.dat into the resources directory
    #[command(visible_alias = "build")]
    Publish {
        /// Re-download even if the archive is cached
        #[arg(short, long)]
        force: bool,
    },

    /// Print the download URL for the configured release
    Url,

    /// Print the build paths for the configured release
    Paths,

    /// Remove build artifacts for the configured release
    Clean {
        /// Remove artifacts for every release and the cached compiler
        #[arg(long)]
        all: bool,
    },
}

impl Commands {
    /// Execute the command
    pub async fn run(self, settings: &Settings) -> Result<()> {
        match self {
            Self::Fetch { force } => pipeline::execute(settings, Stage::Fetch, force).await,
            Self::Unpack { force } => pipeline::execute(settings, Stage::Unpack, force).await,
            Self::Compile { force } => pipeline::execute(settings, Stage::Compile, force).await,
            Self::Publish { force } => pipeline::execute(settings, Stage::Publish, force).await,
            Self::Url => url::execute(settings),
            Self::Paths => paths::execute(settings),
            Self::Clean { all: true } => clean::execute_all(&settings.build_dir),
            Self::Clean { all: false } => clean::execute(settings),
        }
    }
}
