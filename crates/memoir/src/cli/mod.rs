//! Command-line interface module.
//!
//! Argument parsing and the startup sequence for the memoir binary.

mod args;
mod serve;

pub use args::Args;
pub use serve::run;
