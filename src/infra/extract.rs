//! Archive extraction
//!
//! Unpacks gzip-compressed tarballs.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;

use crate::error::ExtractError;

/// Unpack a `.tar.gz` archive into `dest`
///
/// Existing files are overwritten. Entries that would land outside `dest`
/// are rejected. Returns the number of entries unpacked.
pub fn unpack_tar_gz(archive_path: &Path, dest: &Path) -> Result<usize, ExtractError> {
    if !archive_path.is_file() {
        return Err(ExtractError::ArchiveNotFound {
            path: archive_path.to_path_buf(),
        });
    }

    std::fs::create_dir_all(dest).map_err(|e| ExtractError::Io {
        path: dest.to_path_buf(),
        error: e.to_string(),
    })?;

    let file = File::open(archive_path).map_err(|e| ExtractError::Io {
        path: archive_path.to_path_buf(),
        error: e.to_string(),
    })?;

    let corrupt = |e: std::io::Error| ExtractError::Corrupt {
        archive: archive_path.to_path_buf(),
        error: e.to_string(),
    };

    let mut archive = Archive::new(GzDecoder::new(BufReader::new(file)));
    archive.set_overwrite(true);
    archive.set_preserve_permissions(false);

    let mut count = 0;
    for entry in archive.entries().map_err(corrupt)? {
        let mut entry = entry.map_err(corrupt)?;
        let unpacked = entry.unpack_in(dest).map_err(corrupt)?;
        if !unpacked {
            return Err(ExtractError::Corrupt {
                archive: archive_path.to_path_buf(),
                error: format!(
                    "entry '{}' escapes the destination directory",
                    entry.path().map_or_else(|_| "?".into(), |p| p.display().to_string())
                ),
            });
        }
        count += 1;
    }

    if count == 0 {
        return Err(ExtractError::Empty {
            archive: archive_path.to_path_buf(),
        });
    }

    tracing::debug!(
        "Unpacked {count} entries from {} into {}",
        archive_path.display(),
        dest.display()
    );
    Ok(count)
}
