//! Unpack stage
//!
//! Extracts the cached release archive into `<build>/tzdb/<v>/unpacked/<v>/`.
//! The directory is emptied first so files from an earlier extraction do not
//! reach the compiler.

use std::path::PathBuf;

use serde::Serialize;

use crate::core::layout::BuildLayout;
use crate::error::ExtractError;
use crate::infra::extract::unpack_tar_gz;
use crate::infra::filesystem::recreate_dir;

/// Outcome of the unpack stage
#[derive(Debug, Clone, Serialize)]
pub struct UnpackReport {
    /// Directory the archive was extracted into
    pub dir: PathBuf,
    /// Number of archive entries
    pub entries: usize,
}

/// Extract the release archive for `layout`'s version
pub fn unpack_archive(layout: &BuildLayout) -> Result<UnpackReport, ExtractError> {
    let archive = layout.archive_path();
    let dir = layout.unpacked_dir();

    if !archive.is_file() {
        return Err(ExtractError::ArchiveNotFound { path: archive });
    }

    tracing::info!("Unpacking {} into {}", archive.display(), dir.display());
    recreate_dir(&dir).map_err(|e| ExtractError::Io {
        path: dir.clone(),
        error: e.to_string(),
    })?;
    let entries = unpack_tar_gz(&archive, &dir)?;

    Ok(UnpackReport { dir, entries })
}
