//! Clean logic
//!
//! Removes pipeline artifacts from the build directory. The published
//! resources directory is never touched.

use std::path::{Path, PathBuf};

use crate::core::layout::{tzdb_root_in, BuildLayout};
use crate::error::FilesystemError;
use crate::infra::filesystem::remove_dir_all;

/// Result of clean operation
#[derive(Debug, Default)]
pub struct CleanResult {
    /// Directories that were removed
    pub removed: Vec<PathBuf>,
    /// Directories that didn't exist (skipped)
    pub skipped: Vec<PathBuf>,
}

/// Remove `<build>/tzdb/<version>`
pub fn clean_build(layout: &BuildLayout) -> Result<CleanResult, FilesystemError> {
    clean_dir(layout.version_root())
}

/// Remove all of `<build>/tzdb`; needs no version
pub fn clean_all(build_dir: &Path) -> Result<CleanResult, FilesystemError> {
    clean_dir(tzdb_root_in(build_dir))
}

fn clean_dir(target: PathBuf) -> Result<CleanResult, FilesystemError> {
    let mut result = CleanResult::default();
    if remove_dir_all(&target)? {
        tracing::info!("Removed {}", target.display());
        result.removed.push(target);
    } else {
        result.skipped.push(target);
    }
    Ok(result)
}
