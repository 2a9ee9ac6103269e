//! Server configuration.
//!
//! Defaults, then an optional YAML file named by `TASKMASTER_CONFIG`, then
//! the `DATABASE_URL`, `PORT` and `TASKMASTER_LOG` environment variables.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_VAR: &str = "TASKMASTER_CONFIG";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const PORT_VAR: &str = "PORT";
pub const LOG_VAR: &str = "TASKMASTER_LOG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Invalid port {0:?}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// sqlx connection string, e.g. `sqlite:taskmaster.db`
    pub database_url: String,
    pub port: u16,
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub log_level: String,
    /// Directory with a web frontend to serve next to the API
    pub static_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:taskmaster.db".to_string(),
            port: 5000,
            log_level: "info".to_string(),
            static_dir: None,
        }
    }
}

impl AppConfig {
    /// Configuration from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Configuration from an arbitrary variable lookup
    pub fn load_with<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match var(CONFIG_FILE_VAR) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Some(url) = var(DATABASE_URL_VAR) {
            config.database_url = url;
        }
        if let Some(port) = var(PORT_VAR) {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidPort(port))?;
        }
        if let Some(level) = var(LOG_VAR) {
            config.log_level = level;
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
