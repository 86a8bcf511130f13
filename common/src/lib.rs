//! Shared utilities for database init components
//!
//! This crate provides common functionality used across init binaries:
//! - Structured logging initialization
//! - Environment variable sources and parsing helpers
//! - Command execution utilities

pub mod command;
pub mod config;
pub mod logging;

pub use command::{run_checked, CommandOutput};
pub use config::{EnvSource, ProcessEnv};
pub use logging::init_logging;
