//! Publish stage
//!
//! Renames the compiler's `TZDB.dat` to `tzdb.dat` and copies the compiled
//! output directory into the resources directory. Nothing is written to the
//! resources directory unless the compiled file is present.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::defaults::{COMPILER_OUTPUT_FILE, PUBLISHED_FILE};
use crate::error::PublishError;
use crate::infra::filesystem::copy_dir_contents;

/// Outcome of the publish stage
#[derive(Debug, Clone, Serialize)]
pub struct PublishReport {
    /// Canonical compiled file
    pub dat_file: PathBuf,
    /// Destination directory
    pub destination: PathBuf,
    /// Files copied, relative to `destination`
    pub files: Vec<PathBuf>,
}

/// Exact (case-sensitive) file names directly inside `dir`
fn file_names(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
                .filter_map(|e| e.file_name().into_string().ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Rename the compiler output to its lowercase canonical name
///
/// Names are compared exactly so this also behaves on case-insensitive
/// filesystems. An already-normalized `tzdb.dat` is accepted as is.
pub fn normalize_output(dat_dir: &Path) -> Result<PathBuf, PublishError> {
    let names = file_names(dat_dir);
    let canonical = dat_dir.join(PUBLISHED_FILE);

    if names.iter().any(|n| n == COMPILER_OUTPUT_FILE) {
        let emitted = dat_dir.join(COMPILER_OUTPUT_FILE);
        std::fs::rename(&emitted, &canonical).map_err(|e| PublishError::Rename {
            from: emitted.clone(),
            to: canonical.clone(),
            error: e.to_string(),
        })?;
        tracing::debug!("Renamed {COMPILER_OUTPUT_FILE} to {PUBLISHED_FILE}");
        return Ok(canonical);
    }

    if names.iter().any(|n| n == PUBLISHED_FILE) {
        return Ok(canonical);
    }

    Err(PublishError::MissingOutput {
        dir: dat_dir.to_path_buf(),
        expected: COMPILER_OUTPUT_FILE.to_string(),
    })
}

/// Normalize the compiled output and copy it into `destination`
pub fn publish_output(dat_dir: &Path, destination: &Path) -> Result<PublishReport, PublishError> {
    let dat_file = normalize_output(dat_dir)?;

    tracing::info!(
        "Publishing {} to {}",
        dat_dir.display(),
        destination.display()
    );
    let files = copy_dir_contents(dat_dir, destination).map_err(|e| PublishError::Copy {
        from: dat_dir.to_path_buf(),
        to: destination.to_path_buf(),
        error: e.to_string(),
    })?;

    Ok(PublishReport {
        dat_file,
        destination: destination.to_path_buf(),
        files,
    })
}
