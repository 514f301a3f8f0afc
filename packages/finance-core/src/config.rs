//! Configuration loading.
//!
//! Settings live in a TOML file. Default path: `<config dir>/finance-core/config.toml`,
//! overridable with the `FINANCE_CONFIG_FILE` environment variable. A missing
//! file yields the defaults; missing keys fall back to their defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::Period;
use crate::Result;

/// Environment variable overriding the config file location.
pub const CONFIG_FILE_ENV: &str = "FINANCE_CONFIG_FILE";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FinanceConfig {
    /// Lookup cache settings
    pub cache: CacheConfig,
    /// History window used for watchlist snapshots
    pub watchlist_period: Period,
    /// History window charted by the ticker lookup
    pub lookup_period: Period,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            watchlist_period: Period::OneYear,
            lookup_period: Period::OneYear,
        }
    }
}

/// Lookup cache sizing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum cached metadata entries; 0 disables caching
    pub capacity: usize,
    /// Seconds before an entry expires; 0 means never
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 128,
            ttl_secs: 300,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Option<Duration> {
        (self.ttl_secs > 0).then(|| Duration::from_secs(self.ttl_secs))
    }
}

impl FinanceConfig {
    /// Load from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::default_path())
    }

    /// Load from a specific path; a missing file gives the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_FILE_ENV) {
            return PathBuf::from(path);
        }

        directories::ProjectDirs::from("", "", "finance-core")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("finance-core.toml"))
    }
}
