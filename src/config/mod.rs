//! Configuration constants
//!
//! - [`defaults`] - Default settings
//! - [`urls`] - Upstream download locations

pub mod defaults;
pub mod urls;
