//! Infrastructure layer
//!
//! Handles all I/O operations: network, filesystem, archives, and external
//! processes.

pub mod compiler;
pub mod dirs;
pub mod download;
pub mod extract;
pub mod filesystem;
