//! Command implementations for the cytodist CLI.

mod analyze;
mod init;
mod inspect;

// Re-export all command functions
pub use analyze::cmd_analyze;
pub use init::cmd_init;
pub use inspect::cmd_inspect;
