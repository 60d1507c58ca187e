//! Unified error type for all daylog operations.

use std::path::PathBuf;

/// Error type for daylog operations.
#[derive(Debug)]
pub enum Error {
    /// A log file could not be created or opened.
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Writing a line to the active file failed.
    Write(std::io::Error),
    /// Any other I/O error (directory creation, flush, config read).
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Config directory not found.
    ConfigDirNotFound,
    /// The base path has no usable file name component.
    InvalidPath(String),
    /// A limit or option is out of range.
    InvalidConfig(String),
    /// The process-wide logger was already set up.
    AlreadyInitialized,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "cannot open log file {}: {source}", path.display())
            }
            Self::Write(e) => write!(f, "write error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::InvalidPath(s) => write!(f, "invalid path: {s}"),
            Self::InvalidConfig(s) => write!(f, "invalid config: {s}"),
            Self::AlreadyInitialized => write!(f, "logger already initialized"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Write(e) | Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}
