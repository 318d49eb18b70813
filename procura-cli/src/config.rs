//! `procura.toml` configuration.
//!
//! A missing file means defaults. A file that cannot be read or parsed also
//! falls back to defaults, with a warning.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "procura.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Per-entity-type defaults for `validate` and `search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTypeConfig {
    pub name: String,
    #[serde(default)]
    pub required_fields: Vec<String>,
    #[serde(default)]
    pub search_fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcuraConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_expiry_window_days")]
    pub expiry_window_days: u32,
    #[serde(default)]
    pub entity_types: Vec<EntityTypeConfig>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_expiry_window_days() -> u32 {
    procura_model::procurement::DEFAULT_EXPIRY_WINDOW_DAYS
}

impl Default for ProcuraConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            expiry_window_days: default_expiry_window_days(),
            entity_types: Vec::new(),
        }
    }
}

impl ProcuraConfig {
    pub fn entity_type(&self, name: &str) -> Option<&EntityTypeConfig> {
        self.entity_types.iter().find(|e| e.name == name)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}

/// Result of looking for a config file, kept so it can be reported once
/// logging is up.
#[derive(Debug)]
pub enum ConfigLoad {
    Loaded(ProcuraConfig, PathBuf),
    Missing(PathBuf),
    Invalid(PathBuf, ConfigError),
}

impl ConfigLoad {
    /// Reads `explicit`, or `procura.toml` in the working directory.
    pub fn read(explicit: Option<&Path>) -> Self {
        let path = explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::read_from(path)
    }

    pub fn read_from(path: PathBuf) -> Self {
        if !path.exists() {
            return Self::Missing(path);
        }
        match std::fs::read_to_string(&path) {
            Ok(contents) => match ProcuraConfig::parse(&contents) {
                Ok(config) => Self::Loaded(config, path),
                Err(e) => Self::Invalid(path, e),
            },
            Err(e) => Self::Invalid(path, e.into()),
        }
    }

    /// The effective configuration.
    pub fn config(&self) -> ProcuraConfig {
        match self {
            Self::Loaded(config, _) => config.clone(),
            Self::Missing(_) | Self::Invalid(..) => ProcuraConfig::default(),
        }
    }

    /// Logs where the configuration came from.
    pub fn report(&self) {
        match self {
            Self::Loaded(_, path) => info!("Loaded config from {:?}", path),
            Self::Missing(path) => info!("No config file found at {:?}, using defaults", path),
            Self::Invalid(path, e) => {
                warn!("{} ({:?}). Falling back to defaults.", e, path);
            }
        }
    }
}
