//! HTTP download functionality
//!
//! Streams a URL to disk with progress reporting, SHA-256 computation, and
//! optional retry with exponential backoff. Bytes are written to a `.part`
//! sibling and renamed into place only after the transfer completes.

use futures::StreamExt;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::config::defaults;
use crate::error::DownloadError;

/// Progress callback type for download progress reporting
pub type ProgressCallback = Box<dyn Fn(u64, u64) + Send + Sync>;

/// Download result containing file path and metadata
#[derive(Debug)]
pub struct DownloadResult {
    /// Path to the downloaded file
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// SHA256 checksum of the downloaded content
    pub checksum: String,
}

/// Download manager for fetching files with optional retry
#[derive(Debug, Clone)]
pub struct DownloadManager {
    /// HTTP client
    client: reqwest::Client,
    /// Extra attempts after the first
    retries: u32,
    /// Base delay for exponential backoff (in milliseconds)
    base_delay_ms: u64,
}

impl DownloadManager {
    /// Create a download manager with a single attempt per download
    pub fn new() -> Self {
        Self::with_config(
            defaults::DEFAULT_DOWNLOAD_RETRIES,
            defaults::DEFAULT_RETRY_BASE_DELAY_MS,
            Duration::from_secs(defaults::DEFAULT_DOWNLOAD_TIMEOUT_SECS),
        )
    }

    /// Create a download manager with custom settings
    pub fn with_config(retries: u32, base_delay_ms: u64, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .connect_timeout(Duration::from_secs(defaults::CONNECT_TIMEOUT_SECS))
                .user_agent(concat!("tzdb-builder/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            retries,
            base_delay_ms,
        }
    }

    /// Total attempts per download
    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// Download a file, retrying transient failures
    ///
    /// A 404 is never retried: an unknown release stays unknown. On final
    /// failure nothing is left at `dest` or its `.part` sibling.
    pub async fn download(
        &self,
        url: &str,
        dest: &Path,
        progress: Option<ProgressCallback>,
    ) -> Result<DownloadResult, DownloadError> {
        let part = part_path(dest);
        let mut attempts = 0;
        let mut last_error = None;
        let mut delay_ms = self.base_delay_ms;

        while attempts < self.max_attempts() {
            attempts += 1;

            match self.download_once(url, &part, progress.as_ref()).await {
                Ok(mut result) => {
                    tokio::fs::rename(&part, dest)
                        .await
                        .map_err(|e| DownloadError::Io {
                            path: dest.to_path_buf(),
                            error: e.to_string(),
                        })?;
                    result.path = dest.to_path_buf();
                    return Ok(result);
                }
                Err(e @ DownloadError::NotFound { .. }) => {
                    last_error = Some(e);
                    break;
                }
                Err(e) => {
                    tracing::debug!("Attempt {attempts} for {url} failed: {e}");
                    last_error = Some(e);

                    if attempts < self.max_attempts() {
                        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                        delay_ms = (delay_ms * 2).min(defaults::MAX_RETRY_DELAY_MS);
                    }
                }
            }
        }

        let _ = tokio::fs::remove_file(&part).await;

        Err(last_error.unwrap_or_else(|| DownloadError::AttemptsExhausted {
            url: url.to_string(),
            attempts,
        }))
    }

    /// Single download attempt without retry
    async fn download_once(
        &self,
        url: &str,
        dest: &Path,
        progress: Option<&ProgressCallback>,
    ) -> Result<DownloadResult, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::Network {
                url: url.to_string(),
                error: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DownloadError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let total_size = response.content_length().unwrap_or(0);

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DownloadError::Io {
                    path: parent.to_path_buf(),
                    error: e.to_string(),
                })?;
        }

        let mut file = File::create(dest).await.map_err(|e| DownloadError::Io {
            path: dest.to_path_buf(),
            error: e.to_string(),
        })?;

        let mut hasher = Sha256::new();
        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(|e| DownloadError::Network {
                url: url.to_string(),
                error: e.to_string(),
            })?;

            file.write_all(&chunk)
                .await
                .map_err(|e| DownloadError::Io {
                    path: dest.to_path_buf(),
                    error: e.to_string(),
                })?;

            hasher.update(&chunk);
            downloaded += chunk.len() as u64;

            if let Some(cb) = progress {
                cb(downloaded, total_size);
            }
        }

        file.flush().await.map_err(|e| DownloadError::Io {
            path: dest.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(DownloadResult {
            path: dest.to_path_buf(),
            size: downloaded,
            checksum: hex::encode(hasher.finalize()),
        })
    }

    /// Download a file and verify its checksum
    ///
    /// A mismatching download is deleted.
    pub async fn download_verified(
        &self,
        url: &str,
        dest: &Path,
        expected_checksum: &str,
        progress: Option<ProgressCallback>,
    ) -> Result<DownloadResult, DownloadError> {
        let result = self.download(url, dest, progress).await?;

        if !result.checksum.eq_ignore_ascii_case(expected_checksum) {
            let _ = tokio::fs::remove_file(dest).await;

            return Err(DownloadError::ChecksumMismatch {
                file: dest.display().to_string(),
                expected: expected_checksum.to_lowercase(),
                actual: result.checksum,
            });
        }

        Ok(result)
    }
}

impl Default for DownloadManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Temporary path a download streams into
pub fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}

/// Compute the SHA256 checksum of a file
pub fn file_checksum(path: &Path) -> Result<String, DownloadError> {
    let content = std::fs::read(path).map_err(|e| DownloadError::Io {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    Ok(compute_checksum(&content))
}

/// Compute SHA256 checksum of data
pub fn compute_checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_manager(retries: u32) -> DownloadManager {
        DownloadManager::with_config(retries, 10, Duration::from_secs(10))
    }

    // ============================================
    // Unit Tests - Checksum verification
    // ============================================

    #[test]
    fn test_compute_checksum() {
        assert_eq!(
            compute_checksum(b"hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_file_checksum_matches_contents() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("test.txt");
        std::fs::write(&file_path, b"hello world").unwrap();

        assert_eq!(
            file_checksum(&file_path).unwrap(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_file_checksum_file_not_found() {
        assert!(matches!(
            file_checksum(Path::new("/nonexistent/file.txt")),
            Err(DownloadError::Io { .. })
        ));
    }

    #[test]
    fn test_part_path() {
        assert_eq!(
            part_path(Path::new("/b/2021a.tar.gz")),
            PathBuf::from("/b/2021a.tar.gz.part")
        );
    }

    #[test]
    fn test_default_is_single_attempt() {
        assert_eq!(DownloadManager::new().max_attempts(), 1);
        assert_eq!(fast_manager(2).max_attempts(), 3);
    }

    // ============================================
    // Async Tests - Download functionality
    // ============================================

    #[tokio::test]
    async fn test_download_success() {
        let mock_server = MockServer::start().await;
        let content = b"tzdata archive bytes";

        Mock::given(method("GET"))
            .and(path("/tzdata2021a.tar.gz"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
            .mount(&mock_server)
            .await;

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("download").join("2021a.tar.gz");

        let result = fast_manager(0)
            .download(
                &format!("{}/tzdata2021a.tar.gz", mock_server.uri()),
                &dest,
                None,
            )
            .await
            .unwrap();

        assert_eq!(result.path, dest);
        assert_eq!(result.size, content.len() as u64);
        assert_eq!(result.checksum, compute_checksum(content));
        assert_eq!(std::fs::read(&dest).unwrap(), content);
        assert!(!part_path(&dest).exists());
    }

    #[tokio::test]
    async fn test_download_with_progress_callback() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/progress.tar.gz"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"some bytes".to_vec()))
            .mount(&mock_server)
            .await;

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("progress.tar.gz");

        let progress_called = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
        let progress_called_clone = progress_called.clone();
        let progress: ProgressCallback = Box::new(move |downloaded, _total| {
            if downloaded > 0 {
                progress_called_clone.store(true, std::sync::atomic::Ordering::SeqCst);
            }
        });

        fast_manager(0)
            .download(
                &format!("{}/progress.tar.gz", mock_server.uri()),
                &dest,
                Some(progress),
            )
            .await
            .unwrap();

        assert!(progress_called.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_download_not_found_is_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tzdata1999z.tar.gz"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock_server)
            .await;

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("1999z.tar.gz");

        let result = fast_manager(3)
            .download(
                &format!("{}/tzdata1999z.tar.gz", mock_server.uri()),
                &dest,
                None,
            )
            .await;

        assert!(matches!(result, Err(DownloadError::NotFound { .. })));
        assert!(!dest.exists());
        assert!(!part_path(&dest).exists());
    }

    #[tokio::test]
    async fn test_download_server_error_without_retries() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/fail.tar.gz"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("fail.tar.gz");

        let result = fast_manager(0)
            .download(&format!("{}/fail.tar.gz", mock_server.uri()), &dest, None)
            .await;

        match result {
            Err(DownloadError::Status { status, .. }) => assert_eq!(status, 500),
            other => panic!("Expected Status error, got: {other:?}"),
        }
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_download_retry_on_failure() {
        let mock_server = MockServer::start().await;
        let content = b"retry content";

        Mock::given(method("GET"))
            .and(path("/retry.tar.gz"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/retry.tar.gz"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
            .mount(&mock_server)
            .await;

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("retry.tar.gz");

        let result = fast_manager(2)
            .download_verified(
                &format!("{}/retry.tar.gz", mock_server.uri()),
                &dest,
                &compute_checksum(content),
                None,
            )
            .await;

        assert!(result.is_ok());
        assert_eq!(std::fs::read(&dest).unwrap(), content);
    }

    #[tokio::test]
    async fn test_download_verified_checksum_mismatch() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wrong.tar.gz"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"tampered".to_vec()))
            .mount(&mock_server)
            .await;

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("wrong.tar.gz");

        let result = fast_manager(0)
            .download_verified(
                &format!("{}/wrong.tar.gz", mock_server.uri()),
                &dest,
                "0000000000000000000000000000000000000000000000000000000000000000",
                None,
            )
            .await;

        match result {
            Err(DownloadError::ChecksumMismatch { actual, .. }) => {
                assert_eq!(actual, compute_checksum(b"tampered"));
            }
            other => panic!("Expected ChecksumMismatch error, got: {other:?}"),
        }
        assert!(!dest.exists());
    }

    // ============================================
    // Property-Based Tests
    // ============================================

    fn data_strategy() -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(any::<u8>(), 0..1000)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Hashing a file agrees with hashing its bytes
        #[test]
        fn prop_file_checksum_matches_data(data in data_strategy()) {
            let temp = TempDir::new().unwrap();
            let file_path = temp.path().join("archive.bin");
            std::fs::write(&file_path, &data).unwrap();

            prop_assert_eq!(file_checksum(&file_path).unwrap(), compute_checksum(&data));
        }

        /// Checksum is always 64 hex characters
        #[test]
        fn prop_checksum_format(data in data_strategy()) {
            let checksum = compute_checksum(&data);
            prop_assert_eq!(checksum.len(), 64);
            prop_assert!(checksum.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }
}
