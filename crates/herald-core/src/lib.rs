//! Herald Core - Shared foundation for changelog and commit tooling
//!
//! This crate provides the error types and the configuration system used by
//! the other Herald crates.

pub mod config;
pub mod error;

pub use config::{load_config_or_default, Config};
pub use error::{HeraldError, Result};
