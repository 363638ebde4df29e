//! Input expansion shared by the CLI commands.

mod input;

pub use input::{expand_inputs, SUPPORTED_EXTENSIONS};
