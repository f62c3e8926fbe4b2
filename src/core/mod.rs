//! Core pipeline logic
//!
//! Side effects are delegated to [`crate::infra`]; this module decides
//! what runs, in which order, and against which paths.
//!
//! # Submodules
//!
//! - [`version`] - tzdb release identifiers
//! - [`layout`] - Build directory layout
//! - [`config`] - Layered configuration
//! - [`fetch`] - Fetch stage
//! - [`unpack`] - Unpack stage
//! - [`compile`] - Compile stage
//! - [`publish`] - Publish stage
//! - [`pipeline`] - Stage orchestration
//! - [`clean`] - Build artifact removal

pub mod clean;
pub mod compile;
pub mod config;
pub mod fetch;
pub mod layout;
pub mod pipeline;
pub mod publish;
pub mod unpack;
pub mod version;
