//! Tooling & Integration Layer
//!
//! Command-line driver that runs the mode controller against a local host
//! whose session log is a JSON Lines file.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
