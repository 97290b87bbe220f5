//! Shared utilities for cleartrade
//!
//! This crate provides the ambient pieces used across the cleartrade workspace:
//! tracing setup and environment variable lookups.

pub mod env;
pub mod logging;

pub use env::{env_or, env_parse};
pub use logging::init_tracing;
