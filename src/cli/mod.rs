//! CLI module
//!
//! Command-line interface for the loader.
//!
//! # Commands
//!
//! - `load` - Load the dataset into the table (default when no command is given)
//! - `check` - Verify the table exists and print its status

mod commands;
mod output;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use output::Console;
pub use runner::Runner;
