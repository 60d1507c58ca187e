//! Configuration struct definitions.

use crate::logger::{DEFAULT_BUFFER_CAPACITY, DEFAULT_QUEUE_CAPACITY, DEFAULT_SPLIT_LINES};
use serde::Deserialize;

/// General configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Master switch; a disabled logger still opens its file but writes nothing.
    pub enabled: bool,
    /// Threshold for daylog's own diagnostics on stderr.
    pub internal_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            internal_level: "warn".to_string(),
        }
    }
}

/// File output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Base path; `~` is expanded and the file name gets a date prefix.
    pub path: String,
    /// Maximum rendered line size in bytes.
    pub buffer_capacity: usize,
    /// Lines per segment file.
    pub split_lines: u64,
    /// Queue length; 0 means synchronous.
    pub queue_capacity: usize,
    /// `write-through` or `block`.
    pub overflow: String,
    /// Flush to the OS after each line.
    pub auto_flush: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            path: super::default_log_path(),
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            split_lines: DEFAULT_SPLIT_LINES,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            overflow: "write-through".to_string(),
            auto_flush: true,
        }
    }
}
