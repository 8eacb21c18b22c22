//! CLI module for csvboard
//!
//! Provides command-line interface for:
//! - init: Create the data directory and seed CSV files
//! - start: Boot the HTTP server

mod args;
mod commands;
mod errors;
mod logging;

pub use args::{Cli, Command};
pub use commands::{init, run, start};
pub use errors::{CliError, CliResult};
