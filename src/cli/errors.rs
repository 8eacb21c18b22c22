//! CLI-specific error types
//!
//! All CLI errors are fatal: main prints them to stderr and exits non-zero.

use thiserror::Error;

use crate::config::ConfigError;

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Server failed: {0}")]
    Server(String),
}
