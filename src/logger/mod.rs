//! The logger facade: renders records, then hands them to the file or the
//! drainer queue under a single lock.
//!
//! Rendering happens on the caller's thread into a fresh `String`, so the lock
//! only covers queue bookkeeping, rotation and the write itself.

mod builder;
mod drainer;
mod from_config;
mod state;

pub use builder::LoggerBuilder;

use crate::Error;
use crate::clock::Clock;
use crate::fmt::render_line;
use crate::internal;
use crate::level::Level;
use crate::queue::{DeliveryQueue, OverflowPolicy, QueuedLine};
use crate::rotation::{ActiveFile, RotationManager};
use drainer::DrainerHandle;
use state::{Shared, State};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Default render buffer size in bytes, newline included.
pub const DEFAULT_BUFFER_CAPACITY: usize = 8192;
/// Default number of lines per segment file.
pub const DEFAULT_SPLIT_LINES: u64 = 5_000_000;
/// Default queue capacity; 0 means every call writes synchronously.
pub const DEFAULT_QUEUE_CAPACITY: usize = 0;

/// A file logger with day and line-count rotation.
///
/// Share it between threads with `Arc<Logger>`. Dropping the last reference
/// runs [`Logger::shutdown`], which drains the queue before the file is closed.
pub struct Logger {
    shared: Arc<Shared>,
    drainer: Mutex<Option<DrainerHandle>>,
    clock: Arc<dyn Clock>,
    enabled: AtomicBool,
    buffer_capacity: usize,
    overflow: OverflowPolicy,
    is_async: bool,
}

impl Logger {
    /// Stepwise construction for everything beyond the four `init` arguments.
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Opens today's file under `base_path` and, with `queue_capacity >= 1`,
    /// starts the drainer thread.
    ///
    /// `base_path` such as `logs/server.log` produces `logs/2024_05_01_server.log`.
    ///
    /// # Errors
    /// `Error::Open` if the file cannot be opened, `Error::InvalidPath` or
    /// `Error::InvalidConfig` for unusable arguments, `Error::Io` if the
    /// directory or the drainer thread cannot be created.
    pub fn init(
        base_path: impl AsRef<Path>,
        buffer_capacity: usize,
        split_lines: u64,
        queue_capacity: usize,
    ) -> Result<Self, Error> {
        Self::builder()
            .path(base_path.as_ref())
            .buffer_capacity(buffer_capacity)
            .split_lines(split_lines)
            .queue_capacity(queue_capacity)
            .build()
    }

    /// Wires up shared state and the drainer. Called by the builder once the
    /// first file is open.
    fn start(
        rotation: RotationManager,
        active: ActiveFile,
        options: StartOptions,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, Error> {
        let is_async = options.queue_capacity > 0;
        let queue = is_async.then(|| DeliveryQueue::with_capacity(options.queue_capacity));
        let shared = Arc::new(Shared::new(State::new(
            rotation,
            active,
            queue,
            options.auto_flush,
        )));

        let drainer = if is_async {
            let handle = drainer::spawn(Arc::clone(&shared)).inspect_err(|e| {
                internal::error("LOGGER", &format!("Failed to spawn drainer thread: {e}"));
            })?;
            Some(handle)
        } else {
            None
        };

        internal::debug(
            "LOGGER",
            &format!(
                "Logger ready: mode={}, buffer={}, overflow={}",
                if is_async { "async" } else { "sync" },
                options.buffer_capacity,
                options.overflow
            ),
        );

        Ok(Self {
            shared,
            drainer: Mutex::new(drainer),
            clock,
            enabled: AtomicBool::new(options.enabled),
            buffer_capacity: options.buffer_capacity,
            overflow: options.overflow,
            is_async,
        })
    }

    /// Emits one record. Does nothing while the logger is disabled.
    pub fn log(&self, level: Level, msg: &str) {
        self.log_args(level, format_args!("{msg}"));
    }

    /// Emits one record from pre-captured format arguments; the logging macros
    /// end up here.
    pub fn log_args(&self, level: Level, args: std::fmt::Arguments<'_>) {
        if !self.is_enabled() {
            return;
        }

        let now = self.clock.now();
        let text = render_line(&now, level, args, self.buffer_capacity);
        self.shared.deliver(
            QueuedLine {
                date: now.date(),
                text,
            },
            self.overflow,
        );
    }

    pub fn debug(&self, msg: &str) {
        self.log(Level::Debug, msg);
    }

    pub fn info(&self, msg: &str) {
        self.log(Level::Info, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.log(Level::Warn, msg);
    }

    pub fn error(&self, msg: &str) {
        self.log(Level::Error, msg);
    }

    pub fn fatal(&self, msg: &str) {
        self.log(Level::Fatal, msg);
    }

    /// Makes everything written so far durable. Queued lines are not drained.
    ///
    /// # Errors
    /// I/O errors from flushing or syncing the active file.
    pub fn flush(&self) -> Result<(), Error> {
        self.shared.lock().active.flush()
    }

    /// Stops the drainer after it has emptied the queue, writes anything still
    /// queued, then flushes and closes the file. Safe to call more than once
    /// and from several threads; records logged afterwards are dropped.
    pub fn shutdown(&self) {
        {
            let mut state = self.shared.lock();
            if state.closed {
                return;
            }
            state.shutting_down = true;
        }
        self.shared.work.notify_all();
        self.shared.space.notify_all();

        let drainer = self
            .drainer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(drainer) = drainer {
            drainer.join();
        }

        let mut state = self.shared.lock();
        state.drain();
        if let Err(e) = state.active.flush() {
            internal::warn("LOGGER", &format!("Final flush failed: {e}"));
        }
        state.close();
        internal::debug(
            "LOGGER",
            &format!("Logger closed after {} lines", state.active.count()),
        );
    }

    /// Callers check this before building expensive messages.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Turns the logger on or off at runtime.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    #[must_use]
    pub const fn is_async(&self) -> bool {
        self.is_async
    }

    #[must_use]
    pub const fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    #[must_use]
    pub const fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow
    }

    #[must_use]
    pub fn split_lines(&self) -> u64 {
        self.shared.lock().rotation.split_lines()
    }

    /// Path of the file the next direct write goes to, before any rotation it triggers.
    #[must_use]
    pub fn current_path(&self) -> PathBuf {
        self.shared.lock().active.path().to_path_buf()
    }

    /// Lines written since start, or since the last day rollover.
    #[must_use]
    pub fn line_count(&self) -> u64 {
        self.shared.lock().active.count()
    }

    /// Lines waiting for the drainer.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.shared
            .lock()
            .queue
            .as_ref()
            .map_or(0, DeliveryQueue::len)
    }

    /// Lines that found the queue full and were written by the caller instead.
    #[must_use]
    pub fn overflow_writes(&self) -> u64 {
        self.shared.lock().overflow_writes
    }

    /// Lines lost to write or rotation failures.
    #[must_use]
    pub fn write_failures(&self) -> u64 {
        self.shared.lock().write_failures
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("enabled", &self.is_enabled())
            .field("is_async", &self.is_async)
            .field("buffer_capacity", &self.buffer_capacity)
            .field("overflow", &self.overflow)
            .finish_non_exhaustive()
    }
}

/// Options the builder hands over to [`Logger::start`].
struct StartOptions {
    enabled: bool,
    buffer_capacity: usize,
    queue_capacity: usize,
    overflow: OverflowPolicy,
    auto_flush: bool,
}
