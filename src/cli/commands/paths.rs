//! CLI implementation for `tzdb paths`
//!
//! Shows where each stage reads and writes for the configured release.

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::output::{status, OutputConfig};
use crate::core::config::Settings;

/// Paths used by one pipeline run
#[derive(Debug, Serialize)]
struct PathsView {
    version: String,
    archive: PathBuf,
    unpacked: PathBuf,
    compiler_srcdir: PathBuf,
    dat_dir: PathBuf,
    dat_file: PathBuf,
    resources_dir: PathBuf,
}

impl PathsView {
    fn from_settings(settings: &Settings) -> Self {
        let layout = settings.layout();
        Self {
            version: settings.version.to_string(),
            archive: layout.archive_path(),
            unpacked: layout.unpacked_dir(),
            compiler_srcdir: layout.unpacked_root(),
            dat_dir: layout.dat_dir(),
            dat_file: layout.dat_file(),
            resources_dir: settings.resources_dir.clone(),
        }
    }
}

/// Print the build layout
pub fn execute(settings: &Settings) -> Result<()> {
    let view = PathsView::from_settings(settings);

    if OutputConfig::global().json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("{} tzdb {}", status::INFO, view.version);
    println!("  archive:   {}", view.archive.display());
    println!("  unpacked:  {}", view.unpacked.display());
    println!("  srcdir:    {}", view.compiler_srcdir.display());
    println!("  dat:       {}", view.dat_file.display());
    println!("  resources: {}", view.resources_dir.display());
    Ok(())
}
