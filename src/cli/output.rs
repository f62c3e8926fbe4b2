//! Output formatting and progress indicators
//!
//! This module provides utilities for displaying progress bars,
//! status lines, and errors to the user.

use std::sync::OnceLock;

use indicatif::{ProgressBar, ProgressStyle};

use crate::infra::download::ProgressCallback;

static GLOBAL_OUTPUT: OnceLock<OutputConfig> = OnceLock::new();

/// How results are presented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Suppress everything except errors
    pub quiet: bool,
    /// Print machine-readable JSON instead of status lines
    pub json: bool,
    /// Verbosity level from `-v` flags
    pub verbose: u8,
}

impl OutputConfig {
    /// Create an output configuration from CLI flags
    pub fn new(quiet: bool, json: bool, verbose: u8) -> Self {
        Self {
            quiet,
            json,
            verbose,
        }
    }

    /// Install this configuration process-wide; the first call wins
    pub fn apply_global(self) {
        let _ = GLOBAL_OUTPUT.set(self);
    }

    /// The process-wide configuration
    pub fn global() -> Self {
        GLOBAL_OUTPUT.get().copied().unwrap_or_default()
    }

    /// Whether human-readable status lines should be printed
    pub fn shows_status(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Whether progress bars and spinners should be drawn
    pub fn shows_progress(&self) -> bool {
        self.shows_status() && self.verbose == 0
    }

    /// Default `tracing` filter directive for this verbosity
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Print a status line unless output is quiet or JSON
pub fn status_line(prefix: &str, message: &str) {
    if OutputConfig::global().shows_status() {
        println!("{prefix} {message}");
    }
}

/// Print an error and its cause chain to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} Error: {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
}

/// Create a spinner for operations with unknown duration
pub fn create_spinner(message: &str) -> ProgressBar {
    if !OutputConfig::global().shows_progress() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Create a progress bar for downloads
pub fn create_download_bar(total: u64) -> ProgressBar {
    if !OutputConfig::global().shows_progress() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .expect("Invalid progress bar template")
            .progress_chars("█▓▒░"),
    );
    pb
}

/// A download progress callback driving `bar`
///
/// The bar's length is updated once the server reports a content length.
pub fn download_progress(bar: ProgressBar) -> ProgressCallback {
    Box::new(move |downloaded, total| {
        if total > 0 && bar.length() != Some(total) {
            bar.set_length(total);
        }
        bar.set_position(downloaded);
    })
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}
