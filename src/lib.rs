//! tzdb-builder - compile the IANA time-zone database into `tzdb.dat`
//!
//! Downloads a tzdata release, unpacks it, runs an external zone-rules
//! compiler over it, and publishes the resulting `tzdb.dat` into a
//! resources directory.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Pipeline stages, configuration, and build layout
//! - [`infra`] - Infrastructure layer (network, filesystem, archives, processes)
//! - [`config`] - Configuration constants and URLs
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
