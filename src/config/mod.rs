//! TOML configuration loading.
//!
//! Struct definitions live in `structs`; this module handles where the file is
//! and how string options turn into typed values.

mod structs;

pub use structs::{FileConfig, GeneralConfig};

use crate::internal;
use crate::level::Level;
use crate::queue::OverflowPolicy;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_FILE: &str = "daylog.toml";

/// Every field defaults, so an empty file still yields a working logger.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub file: FileConfig,
}

/// `daylog.log` under the platform state directory, or `logs/daylog.log` when
/// the platform has none.
#[must_use]
pub fn default_log_path() -> String {
    directories::ProjectDirs::from("", "", "daylog").map_or_else(
        || "logs/daylog.log".to_string(),
        |dirs| {
            dirs.state_dir()
                .unwrap_or_else(|| dirs.data_dir())
                .join("daylog.log")
                .to_string_lossy()
                .into_owned()
        },
    )
}

impl Config {
    /// Reads the config from its default location; a missing file yields defaults.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined, the file can't be
    /// read, or TOML parsing hits a syntax error.
    pub fn load() -> Result<Self, crate::Error> {
        internal::debug("CONFIG", "Loading config from default location");
        let config_path = Self::get_config_path()?;
        let config = Self::load_from(&config_path)?;
        internal::info(
            "CONFIG",
            &format!("Config loaded from {}", config_path.display()),
        );
        Ok(config)
    }

    /// Reads the config from `path`; a missing file yields defaults.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        if !path.exists() {
            internal::debug("CONFIG", "Config file not found, using defaults");
            return Ok(Self::default());
        }
        fs::read_to_string(path)?.parse()
    }

    /// `<config dir>/daylog/daylog.toml`.
    ///
    /// # Errors
    /// Fails when the platform has no concept of a config directory.
    pub fn get_config_path() -> Result<PathBuf, crate::Error> {
        directories::ProjectDirs::from("", "", "daylog")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// `file.path` with a leading `~` expanded.
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.file.path).into_owned())
    }

    /// Unknown names fall back to WARN with a diagnostic.
    #[must_use]
    pub fn parse_internal_level(&self) -> Level {
        self.general.internal_level.parse().unwrap_or_else(|e| {
            internal::warn("CONFIG", &format!("{e}, using warn"));
            Level::Warn
        })
    }

    /// Unknown names fall back to write-through with a diagnostic.
    #[must_use]
    pub fn parse_overflow(&self) -> OverflowPolicy {
        self.file.overflow.parse().unwrap_or_else(|e| {
            internal::warn("CONFIG", &format!("{e}, using write-through"));
            OverflowPolicy::WriteThrough
        })
    }
}

impl FromStr for Config {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}
