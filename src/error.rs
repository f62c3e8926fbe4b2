//! Error types for tzdb-builder
//!
//! One error enum per pipeline stage, plus a top-level [`TzdbError`].

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No version supplied by any configuration layer
    #[error("No tzdb version configured. Pass --tzdb-version, set TZDB_VERSION, or add `version` to tzdb.toml")]
    MissingVersion,

    /// Version string is empty or not path-safe
    #[error("Invalid tzdb version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    /// Failed to read config file
    #[error("Failed to read config file '{path}': {error}")]
    ReadError { path: PathBuf, error: String },

    /// Failed to parse config file
    #[error("Failed to parse config file '{path}': {error}")]
    ParseError { path: PathBuf, error: String },

    /// URL template lacks the version placeholder
    #[error("URL template '{template}' does not contain a {{version}} placeholder")]
    InvalidUrlTemplate { template: String },
}

/// Download errors
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Network error
    #[error("Network error downloading '{url}': {error}")]
    Network { url: String, error: String },

    /// Upstream has no such file (unknown release)
    #[error("Not found: '{url}' (is the version a published release?)")]
    NotFound { url: String },

    /// Any other non-success HTTP status
    #[error("HTTP {status} downloading '{url}'")]
    Status { url: String, status: u16 },

    /// Checksum verification failed
    #[error("Checksum mismatch for '{file}': expected {expected}, got {actual}")]
    ChecksumMismatch {
        file: String,
        expected: String,
        actual: String,
    },

    /// IO error
    #[error("IO error for '{path}': {error}")]
    Io { path: PathBuf, error: String },

    /// All attempts failed
    #[error("Download failed after {attempts} attempts: {url}")]
    AttemptsExhausted { url: String, attempts: u32 },
}

/// Archive extraction errors
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Archive file is missing
    #[error("Archive not found: {path}")]
    ArchiveNotFound { path: PathBuf },

    /// Archive could not be decompressed or unpacked
    #[error("Failed to unpack '{archive}': {error}")]
    Corrupt { archive: PathBuf, error: String },

    /// Archive unpacked to nothing
    #[error("Archive '{archive}' contains no entries")]
    Empty { archive: PathBuf },

    /// IO error
    #[error("IO error for '{path}': {error}")]
    Io { path: PathBuf, error: String },
}

/// Zone-rules compiler errors
#[derive(Error, Debug)]
pub enum CompileError {
    /// Compiler program not on PATH
    #[error("Compiler program '{program}' not found. Install it or set compiler.program in tzdb.toml")]
    ToolNotFound { program: String },

    /// Input directory missing
    #[error("Compiler input directory not found: {path}")]
    InputNotFound { path: PathBuf },

    /// Process could not be started
    #[error("Failed to run '{program}': {error}")]
    Spawn { program: String, error: String },

    /// Process exited unsuccessfully
    #[error("Compiler '{program}' failed ({status}): {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    /// Compiler jar could not be fetched
    #[error("Failed to fetch compiler jar: {0}")]
    Jar(#[from] DownloadError),

    /// IO error
    #[error("IO error for '{path}': {error}")]
    Io { path: PathBuf, error: String },
}

/// Publish errors
#[derive(Error, Debug)]
pub enum PublishError {
    /// Compiler produced no output file
    #[error("Compiler output '{expected}' not found in {dir}")]
    MissingOutput { dir: PathBuf, expected: String },

    /// Rename to the canonical name failed
    #[error("Failed to rename '{from}' to '{to}': {error}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// Copy into the resources directory failed
    #[error("Failed to copy '{from}' to '{to}': {error}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to copy file
    #[error("Failed to copy '{from}' to '{to}': {error}")]
    CopyFile {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// Failed to walk a directory tree
    #[error("Failed to read directory '{path}': {error}")]
    ReadDir { path: PathBuf, error: String },
}

/// Top-level error type
#[derive(Error, Debug)]
pub enum TzdbError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Fetch stage failed
    #[error("Fetch failed: {0}")]
    Download(#[from] DownloadError),

    /// Unpack stage failed
    #[error("Unpack failed: {0}")]
    Extract(#[from] ExtractError),

    /// Compile stage failed
    #[error("Compile failed: {0}")]
    Compile(#[from] CompileError),

    /// Publish stage failed
    #[error("Publish failed: {0}")]
    Publish(#[from] PublishError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),
}
