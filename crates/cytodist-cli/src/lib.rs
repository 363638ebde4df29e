//! Shared utilities for cytodist-cli
//!
//! Command implementations plus the argument parsing and input expansion
//! helpers they share.

pub mod commands;
pub mod parsers;
pub mod processing;

// Re-export commonly used items at the crate root for convenience
pub use parsers::parse_analysis_kind;
pub use processing::{expand_inputs, SUPPORTED_EXTENSIONS};
