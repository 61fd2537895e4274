//! Configuration for assetval.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line flags and environment variables (ASSETVAL_CONFIG,
//!    ASSETVAL_MAX_PARALLEL)
//! 2. Config file (.assetval/config.yaml)
//! 3. Defaults
//!
//! Config file discovery:
//! - An explicit path (`--config` / ASSETVAL_CONFIG) wins
//! - Otherwise searches current directory and parents for .assetval/config.yaml
//! - Finally falls back to ~/.assetval/config.yaml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::ValidationSettings;

/// Directory holding the config file, relative to a project root or home
pub const CONFIG_DIR: &str = ".assetval";

/// Config file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.yaml";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub validation: ValidationSettings,
    #[serde(default)]
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchConfig {
    /// Maximum number of assets validated concurrently
    pub max_parallel: Option<usize>,
}

/// Resolved configuration
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Policy thresholds used by the validator
    pub validation: ValidationSettings,
    /// Worker limit for batch runs
    pub max_parallel: usize,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            validation: ValidationSettings::default(),
            max_parallel: default_max_parallel(),
        }
    }
}

impl ResolvedConfig {
    /// Resolve a parsed config file, applying defaults for unset fields
    pub fn from_file(file: ConfigFile, path: Option<PathBuf>) -> Self {
        Self {
            config_file: path,
            validation: file.validation,
            max_parallel: file
                .batch
                .max_parallel
                .filter(|n| *n > 0)
                .unwrap_or_else(default_max_parallel),
        }
    }
}

/// Number of workers when nothing is configured
pub fn default_max_parallel() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.is_file() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    let home_config = dirs::home_dir()?.join(CONFIG_DIR).join(CONFIG_FILE);
    home_config.is_file().then_some(home_config)
}

/// Load and parse config file
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Load configuration from all sources
///
/// `explicit` is the path given on the command line or through
/// ASSETVAL_CONFIG; it must exist when provided.
pub fn load_config(explicit: Option<&Path>) -> Result<ResolvedConfig> {
    let config_path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(),
    };

    let mut config = match config_path {
        Some(path) => {
            let file = load_config_file(&path)?;
            tracing::debug!(config = %path.display(), "loaded config file");
            ResolvedConfig::from_file(file, Some(path))
        }
        None => ResolvedConfig::default(),
    };

    if let Ok(value) = std::env::var("ASSETVAL_MAX_PARALLEL") {
        let parsed: usize = value
            .parse()
            .with_context(|| format!("Invalid ASSETVAL_MAX_PARALLEL: {}", value))?;
        if parsed > 0 {
            config.max_parallel = parsed;
        }
    }

    Ok(config)
}
