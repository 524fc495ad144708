//! # Configuration
//!
//! Server configuration is loaded with [`confique`] from, in priority order:
//! 1. **Environment variables**: `COINDAILY_BIND`, `COINDAILY_ENVIRONMENT`, ...
//! 2. **Config file**: a TOML file passed with `--config`.
//! 3. **Compiled defaults**: `#[config(default = ...)]` below.
//!
//! Command-line flags of the binary override the loaded values.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `bind` | `127.0.0.1:3000` | Listen address |
//! | `environment` | `production` | `development` exposes error detail on 500s |
//! | `draft_delay_ms` | `1500` | Artificial latency of the drafting endpoint |
//! | `storage.backend` | `sqlite` | `memory` or `sqlite` |
//! | `storage.path` | `coindaily.sqlite3` | SQLite database file |
//! | `storage.seed` | `true` | Load initial content into empty collections |
//! | `pagination.default_limit` | `10` | Page size when `limit` is absent |
//! | `pagination.max_limit` | `100` | Largest accepted `limit` |

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use confique::Config;
use serde::Deserialize;

use crate::service::Limits;

#[derive(Config, Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    #[config(default = "127.0.0.1:3000", env = "COINDAILY_BIND")]
    pub bind: String,

    /// Runtime environment.
    #[config(default = "production", env = "COINDAILY_ENVIRONMENT")]
    pub environment: Environment,

    /// Delay before a drafting request completes, in milliseconds.
    #[config(default = 1500, env = "COINDAILY_DRAFT_DELAY_MS")]
    pub draft_delay_ms: u64,

    #[config(nested)]
    pub storage: StorageConfig,

    #[config(nested)]
    pub pagination: PaginationConfig,
}

#[derive(Config, Debug, Clone)]
pub struct StorageConfig {
    #[config(default = "sqlite", env = "COINDAILY_STORAGE")]
    pub backend: Backend,

    #[config(default = "coindaily.sqlite3", env = "COINDAILY_DATABASE")]
    pub path: PathBuf,

    #[config(default = true, env = "COINDAILY_SEED")]
    pub seed: bool,
}

#[derive(Config, Debug, Clone)]
pub struct PaginationConfig {
    #[config(default = 10)]
    pub default_limit: usize,

    #[config(default = 100)]
    pub max_limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Environment {
    Development,
    Production,
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment '{other}' (development|production)")),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Backend {
    Memory,
    Sqlite,
}

impl TryFrom<String> for Backend {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "memory" => Ok(Backend::Memory),
            "sqlite" => Ok(Backend::Sqlite),
            other => Err(format!("unknown storage backend '{other}' (memory|sqlite)")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] confique::Error),
    #[error("pagination: default_limit {default} must be between 1 and max_limit {max}")]
    Pagination { default: usize, max: usize },
}

impl ServerConfig {
    /// Load from the environment and an optional TOML file.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        let config = builder.load()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let PaginationConfig {
            default_limit,
            max_limit,
        } = self.pagination;
        if default_limit == 0 || default_limit > max_limit {
            return Err(ConfigError::Pagination {
                default: default_limit,
                max: max_limit,
            });
        }
        Ok(())
    }

    pub fn limits(&self) -> Limits {
        Limits {
            default_limit: self.pagination.default_limit,
            max_limit: self.pagination.max_limit,
        }
    }

    pub fn expose_error_detail(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn draft_delay(&self) -> Duration {
        Duration::from_millis(self.draft_delay_ms)
    }
}
