//! `Logger::init` covers the four classic knobs; the builder exposes the rest
//! (enable flag, overflow policy, auto flush, clock).

use super::{
    DEFAULT_BUFFER_CAPACITY, DEFAULT_QUEUE_CAPACITY, DEFAULT_SPLIT_LINES, Logger, StartOptions,
};
use crate::Error;
use crate::clock::{Clock, SystemClock};
use crate::config::default_log_path;
use crate::fmt::MIN_CAPACITY;
use crate::internal;
use crate::queue::OverflowPolicy;
use crate::rotation::{LogPath, RotationManager};
use std::num::NonZeroU64;
use std::path::PathBuf;
use std::sync::Arc;

/// Collects logger options; [`LoggerBuilder::build`] opens the first file.
pub struct LoggerBuilder {
    path: PathBuf,
    enabled: bool,
    buffer_capacity: usize,
    split_lines: u64,
    queue_capacity: usize,
    overflow: OverflowPolicy,
    auto_flush: bool,
    clock: Arc<dyn Clock>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    /// Synchronous, enabled, 8 KiB lines, 5,000,000 lines per segment, logging
    /// to `daylog.log` under the platform state directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(default_log_path()),
            enabled: true,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            split_lines: DEFAULT_SPLIT_LINES,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            overflow: OverflowPolicy::default(),
            auto_flush: true,
            clock: Arc::new(SystemClock),
        }
    }

    /// Base path; the date prefix is added to its file name.
    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// A disabled logger skips rendering and I/O entirely.
    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Maximum rendered line size in bytes, newline included.
    #[must_use]
    pub const fn buffer_capacity(mut self, bytes: usize) -> Self {
        self.buffer_capacity = bytes;
        self
    }

    /// Lines per segment file before `.1`, `.2`, ... files start.
    #[must_use]
    pub const fn split_lines(mut self, lines: u64) -> Self {
        self.split_lines = lines;
        self
    }

    /// 0 keeps the logger synchronous; anything else starts a drainer thread.
    #[must_use]
    pub const fn queue_capacity(mut self, lines: usize) -> Self {
        self.queue_capacity = lines;
        self
    }

    /// What producers do when the queue is full.
    #[must_use]
    pub const fn overflow(mut self, policy: OverflowPolicy) -> Self {
        self.overflow = policy;
        self
    }

    /// Push buffered bytes to the OS after every line.
    #[must_use]
    pub const fn auto_flush(mut self, enabled: bool) -> Self {
        self.auto_flush = enabled;
        self
    }

    /// Replaces the system clock.
    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Validates the options, opens today's file and starts the drainer if needed.
    ///
    /// # Errors
    /// `Error::InvalidConfig` for a buffer smaller than the line header or a zero
    /// segment size, `Error::InvalidPath` for a path without a file name,
    /// `Error::Open` if the file cannot be opened, `Error::Io` if the directory
    /// or the drainer thread cannot be created.
    pub fn build(self) -> Result<Logger, Error> {
        if self.buffer_capacity < MIN_CAPACITY {
            return Err(Error::InvalidConfig(format!(
                "buffer_capacity must be at least {MIN_CAPACITY} bytes, got {}",
                self.buffer_capacity
            )));
        }
        let split_lines = NonZeroU64::new(self.split_lines).ok_or_else(|| {
            Error::InvalidConfig("split_lines must be at least 1".to_string())
        })?;

        let log_path = LogPath::parse(&self.path)?;
        log_path.ensure_dir()?;

        let rotation = RotationManager::new(log_path, split_lines);
        let today = self.clock.now().date();
        let active = rotation.open(today).inspect_err(|e| {
            internal::error("LOGGER", &e.to_string());
        })?;
        internal::info(
            "LOGGER",
            &format!("Logging to {}", active.path().display()),
        );

        Logger::start(
            rotation,
            active,
            StartOptions {
                enabled: self.enabled,
                buffer_capacity: self.buffer_capacity,
                queue_capacity: self.queue_capacity,
                overflow: self.overflow,
                auto_flush: self.auto_flush,
            },
            self.clock,
        )
    }
}
