//! Optional process-wide logger for code that cannot thread a handle through.
//!
//! Set up once with [`init`] or [`try_init`]; a second attempt is refused, so at
//! most one drainer thread ever runs on behalf of the global instance. Statics
//! are never dropped, so call [`shutdown`] before the process exits to drain
//! the queue.

use crate::Error;
use crate::logger::{Logger, LoggerBuilder};
use std::path::Path;
use std::sync::OnceLock;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Installs the logger built by `builder`.
///
/// # Errors
/// `Error::AlreadyInitialized` if a global logger exists, otherwise anything
/// [`LoggerBuilder::build`] returns.
pub fn try_init(builder: LoggerBuilder) -> Result<&'static Logger, Error> {
    if GLOBAL.get().is_some() {
        return Err(Error::AlreadyInitialized);
    }
    // A racing initializer may win between the check and `set`; the loser's
    // logger is shut down when it is dropped here.
    GLOBAL
        .set(builder.build()?)
        .map_err(|_| Error::AlreadyInitialized)?;
    GLOBAL.get().ok_or(Error::AlreadyInitialized)
}

/// Classic entry point: `false` when the file cannot be opened or a global
/// logger already exists.
pub fn init(
    base_path: impl AsRef<Path>,
    enabled: bool,
    buffer_capacity: usize,
    split_lines: u64,
    queue_capacity: usize,
) -> bool {
    let builder = Logger::builder()
        .path(base_path.as_ref())
        .enabled(enabled)
        .buffer_capacity(buffer_capacity)
        .split_lines(split_lines)
        .queue_capacity(queue_capacity);

    match try_init(builder) {
        Ok(_) => true,
        Err(e) => {
            crate::internal::error("GLOBAL", &e.to_string());
            false
        }
    }
}

/// The global logger, if one was installed.
#[must_use]
pub fn get() -> Option<&'static Logger> {
    GLOBAL.get()
}

/// Drains and closes the global logger. Later records are dropped.
pub fn shutdown() {
    if let Some(logger) = GLOBAL.get() {
        logger.shutdown();
    }
}
