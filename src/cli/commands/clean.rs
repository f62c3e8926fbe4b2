//! CLI implementation for `tzdb clean` command
//!
//! This module handles the CLI interface for removing build artifacts.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::{status, status_line};
use crate::core::clean::{clean_all, clean_build, CleanResult};
use crate::core::config::Settings;

/// Execute the clean command for the configured release
pub fn execute(settings: &Settings) -> Result<()> {
    let result =
        clean_build(&settings.layout()).with_context(|| "Failed to clean build artifacts")?;
    report(&result);
    Ok(())
}

/// Execute `clean --all`
pub fn execute_all(build_dir: &Path) -> Result<()> {
    let result = clean_all(build_dir).with_context(|| "Failed to clean build artifacts")?;
    report(&result);
    Ok(())
}

fn report(result: &CleanResult) {
    if result.removed.is_empty() {
        status_line(status::SUCCESS, "Nothing to clean");
    } else {
        for dir in &result.removed {
            status_line(status::SUCCESS, &format!("Removed {}", dir.display()));
        }
    }
}
