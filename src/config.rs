//! Server and Resource Configuration
//!
//! Loaded from a JSON file. Every field has a serde default, so a missing
//! file or a partial config still yields the original deployment: documents,
//! savings, costs and tasks resources with their sample seed rows.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::Record;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors, all fatal at boot
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(String),

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Write contract of a resource's save endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// POST replaces the whole file
    #[default]
    Replace,
    /// POST merges new rows after the existing ones
    Append,
}

/// One named CSV-backed resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Resource name, used in logs and handler state
    pub name: String,

    /// CSV file name under the data directory
    pub file: String,

    /// Route prefix under /api; `None` binds /api/data and /api/save
    #[serde(default)]
    pub prefix: Option<String>,

    /// Replace or append on POST (default: replace)
    #[serde(default)]
    pub mode: WriteMode,

    /// Rows written by `init` when the file does not exist yet
    #[serde(default)]
    pub seed: Vec<Record>,
}

impl ResourceConfig {
    /// GET route for this resource
    pub fn data_path(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("/api/{}/data", prefix),
            None => "/api/data".to_string(),
        }
    }

    /// POST route for this resource
    pub fn save_path(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("/api/{}/save", prefix),
            None => "/api/save".to_string(),
        }
    }

    /// Absolute location of the backing file
    pub fn file_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.file)
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Host to bind to (default: "127.0.0.1")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty means fully permissive
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Directory holding the CSV files (default: "./data")
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Resource table (default: the original dashboard's four resources)
    #[serde(default = "default_resources")]
    pub resources: Vec<ResourceConfig>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_resources() -> Vec<ResourceConfig> {
    vec![
        ResourceConfig {
            name: "documents".to_string(),
            file: "DocumentTracker.csv".to_string(),
            prefix: None,
            mode: WriteMode::Replace,
            seed: vec![
                Record::from_pairs([("Name", "John Doe"), ("Age", "30"), ("City", "New York")]),
                Record::from_pairs([("Name", "Jane Smith"), ("Age", "25"), ("City", "London")]),
            ],
        },
        ResourceConfig {
            name: "savings".to_string(),
            file: "savings_data.csv".to_string(),
            prefix: Some("chart".to_string()),
            mode: WriteMode::Replace,
            seed: vec![
                Record::from_pairs([
                    ("Month", "Jan"),
                    ("Year", "2024"),
                    ("Reason", "Salary"),
                    ("Value", "1000"),
                ]),
                Record::from_pairs([
                    ("Month", "Feb"),
                    ("Year", "2024"),
                    ("Reason", "Salary"),
                    ("Value", "1200"),
                ]),
            ],
        },
        ResourceConfig {
            name: "costs".to_string(),
            file: "cost_data.csv".to_string(),
            prefix: Some("bar".to_string()),
            mode: WriteMode::Replace,
            seed: vec![
                Record::from_pairs([("Description", "Rent"), ("Cost", "800")]),
                Record::from_pairs([("Description", "Food"), ("Cost", "300")]),
                Record::from_pairs([("Description", "Transport"), ("Cost", "150")]),
            ],
        },
        ResourceConfig {
            name: "tasks".to_string(),
            file: "tasks.csv".to_string(),
            prefix: Some("tasks".to_string()),
            mode: WriteMode::Append,
            seed: Vec::new(),
        },
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            data_dir: default_data_dir(),
            resources: default_resources(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;

        let config: Config =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration, falling back to the defaults when the file is absent
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!("config file {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate the resource table
    pub fn validate(&self) -> ConfigResult<()> {
        let mut names = HashSet::new();
        let mut routes = HashSet::new();

        for resource in &self.resources {
            if resource.name.is_empty() {
                return Err(ConfigError::Invalid(
                    "resource name must not be empty".to_string(),
                ));
            }
            if resource.file.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "resource '{}' has an empty file name",
                    resource.name
                )));
            }
            if matches!(&resource.prefix, Some(prefix) if prefix.is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "resource '{}' has an empty route prefix",
                    resource.name
                )));
            }
            if !names.insert(resource.name.clone()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate resource name '{}'",
                    resource.name
                )));
            }
            if !routes.insert(resource.data_path()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate route prefix for resource '{}'",
                    resource.name
                )));
            }
        }

        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
