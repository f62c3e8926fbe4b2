//! Fetch stage
//!
//! Downloads the release archive to its version-keyed cache path. A
//! non-empty file already at that path is reused unless `force` is set or
//! it fails a configured checksum.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::defaults;
use crate::core::config::Settings;
use crate::error::DownloadError;
use crate::infra::download::{file_checksum, DownloadManager, ProgressCallback};
use crate::infra::filesystem::is_non_empty_file;

/// Options for fetching
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Re-download even if the file is cached
    pub force: bool,
}

/// Outcome of fetching one file
#[derive(Debug, Clone, Serialize)]
pub struct FetchReport {
    /// Source URL
    pub url: String,
    /// Local path
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// SHA-256 of the file
    pub sha256: String,
    /// Whether the cached copy was reused
    pub cached: bool,
}

/// Build the download manager described by the settings
pub fn download_manager(settings: &Settings) -> DownloadManager {
    DownloadManager::with_config(
        settings.download.retries,
        defaults::DEFAULT_RETRY_BASE_DELAY_MS,
        settings.download.timeout,
    )
}

/// Fetch the release archive for the configured version
pub async fn fetch_archive(
    settings: &Settings,
    options: &FetchOptions,
    progress: Option<ProgressCallback>,
) -> Result<FetchReport, DownloadError> {
    let layout = settings.layout();
    fetch_file(
        &download_manager(settings),
        &settings.download.url,
        &layout.archive_path(),
        settings.download.sha256.as_deref(),
        options.force,
        progress,
    )
    .await
}

/// Fetch `url` to `dest`, reusing a cached copy when allowed
pub async fn fetch_file(
    manager: &DownloadManager,
    url: &str,
    dest: &Path,
    expected_sha256: Option<&str>,
    force: bool,
    progress: Option<ProgressCallback>,
) -> Result<FetchReport, DownloadError> {
    if !force && is_non_empty_file(dest) {
        let checksum = file_checksum(dest)?;
        match expected_sha256 {
            Some(expected) if !checksum.eq_ignore_ascii_case(expected) => {
                tracing::warn!(
                    "Cached {} does not match the expected checksum, downloading again",
                    dest.display()
                );
                tokio::fs::remove_file(dest)
                    .await
                    .map_err(|e| DownloadError::Io {
                        path: dest.to_path_buf(),
                        error: e.to_string(),
                    })?;
            }
            _ => {
                tracing::info!("Using cached {}", dest.display());
                let size = std::fs::metadata(dest)
                    .map(|m| m.len())
                    .map_err(|e| DownloadError::Io {
                        path: dest.to_path_buf(),
                        error: e.to_string(),
                    })?;
                return Ok(FetchReport {
                    url: url.to_string(),
                    path: dest.to_path_buf(),
                    size,
                    sha256: checksum,
                    cached: true,
                });
            }
        }
    }

    tracing::info!("Downloading {url}");
    let result = match expected_sha256 {
        Some(expected) => {
            manager
                .download_verified(url, dest, expected, progress)
                .await?
        }
        None => manager.download(url, dest, progress).await?,
    };

    Ok(FetchReport {
        url: url.to_string(),
        path: result.path,
        size: result.size,
        sha256: result.checksum,
        cached: false,
    })
}
