//! CLI argument definitions using clap
//!
//! Commands:
//! - csvboard init --config <path>
//! - csvboard start --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// csvboard - a CSV-backed dashboard API server
#[derive(Parser, Debug)]
#[command(name = "csvboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data directory and seed absent CSV files
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./csvboard.json")]
        config: PathBuf,
    },

    /// Start the API server
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./csvboard.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
