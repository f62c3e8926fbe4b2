//! Filesystem operations
//!
//! Handles file and directory operations.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Remove a directory and all its contents
///
/// Returns whether anything was removed.
pub fn remove_dir_all(path: &Path) -> Result<bool, FilesystemError> {
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_dir_all(path).map_err(|e| FilesystemError::RemoveDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    Ok(true)
}

/// Remove and recreate a directory so it starts empty
pub fn recreate_dir(path: &Path) -> Result<(), FilesystemError> {
    remove_dir_all(path)?;
    create_dir_all(path)
}

/// Whether `path` is a non-empty regular file
pub fn is_non_empty_file(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|m| m.is_file() && m.len() > 0)
}

/// Regular files under `dir`, as paths relative to `dir`, in sorted order
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>, FilesystemError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| FilesystemError::ReadDir {
            path: dir.to_path_buf(),
            error: e.to_string(),
        })?;
        if entry.file_type().is_file() {
            if let Ok(relative) = entry.path().strip_prefix(dir) {
                files.push(relative.to_path_buf());
            }
        }
    }
    Ok(files)
}

/// Copy every regular file under `src` into `dest`, preserving relative paths
///
/// Existing files in `dest` are overwritten; unrelated files are kept.
/// Returns the relative paths copied.
pub fn copy_dir_contents(src: &Path, dest: &Path) -> Result<Vec<PathBuf>, FilesystemError> {
    let files = list_files(src)?;
    create_dir_all(dest)?;

    for relative in &files {
        let from = src.join(relative);
        let to = dest.join(relative);
        if let Some(parent) = to.parent() {
            create_dir_all(parent)?;
        }
        std::fs::copy(&from, &to).map_err(|e| FilesystemError::CopyFile {
            from: from.clone(),
            to: to.clone(),
            error: e.to_string(),
        })?;
    }

    Ok(files)
}
