//! Shared utilities for ofstate.
//!
//! This crate provides common utilities used across the ofstate workspace:
//! - Logging setup with tracing
//! - Path utilities

pub mod log;
pub mod path;

pub use log::{LogConfig, LogLevel};
