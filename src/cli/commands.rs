//! CLI command implementations
//!
//! `init` creates on-disk state, `start` only serves. A missing config file
//! falls back to the built-in resource table, so both commands work out of
//! the box.

use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::http_server::HttpServer;
use crate::store::CsvStore;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::logging;

/// Parse arguments, initialize logging, and dispatch
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    logging::init(cli.verbose);

    match cli.command {
        Command::Init { config } => init(&config),
        Command::Start { config } => start(&config),
    }
}

/// Create the data directory and write seed rows for absent CSV files.
/// Existing files are never touched.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;

    fs::create_dir_all(&config.data_dir).map_err(|e| CliError::Io(e.to_string()))?;
    tracing::info!("data directory: {}", config.data_dir.display());

    for resource in &config.resources {
        let path = resource.file_path(&config.data_dir);
        if path.exists() {
            tracing::info!("{}: {} already exists", resource.name, path.display());
            continue;
        }

        let store = CsvStore::new(path.clone());
        store
            .write(&resource.seed)
            .map_err(|e| CliError::Io(e.to_string()))?;
        tracing::info!(
            "{}: created {} with {} seed rows",
            resource.name,
            path.display(),
            resource.seed.len()
        );
    }

    Ok(())
}

/// Load the config and serve until shutdown
pub fn start(config_path: &Path) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;
    let server = HttpServer::with_config(config);

    let runtime = tokio::runtime::Runtime::new().map_err(|e| CliError::Io(e.to_string()))?;
    runtime
        .block_on(server.start())
        .map_err(|e| CliError::Server(e.to_string()))
}
