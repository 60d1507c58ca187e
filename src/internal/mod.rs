//! Daylog's own diagnostics: write failures, rotation problems, drainer lifecycle.
//!
//! Reports go to stderr rather than through a `Logger`, because most of them are
//! raised while the logger's lock is held and the active file may be the thing
//! that is broken. The threshold is process-wide and defaults to WARN.

use crate::level::Level;
use std::sync::atomic::{AtomicU8, Ordering};

static THRESHOLD: AtomicU8 = AtomicU8::new(Level::Warn as u8);

/// Sets the minimum severity of diagnostics that reach stderr.
pub fn set_level(level: Level) {
    THRESHOLD.store(level as u8, Ordering::Relaxed);
}

/// Current diagnostics threshold.
#[must_use]
pub fn level() -> Level {
    Level::from_u8(THRESHOLD.load(Ordering::Relaxed))
}

/// Checked before building a message so suppressed diagnostics cost nothing.
#[must_use]
pub fn enabled(level: Level) -> bool {
    level >= self::level()
}

fn log(level: Level, scope: &str, msg: &str) {
    if enabled(level) {
        eprintln!("daylog {}{scope:<8} {msg}", level.tag());
    }
}

/// Startup and teardown details.
pub fn debug(scope: &str, msg: &str) {
    log(Level::Debug, scope, msg);
}

/// Normal milestones such as config loaded or drainer started.
pub fn info(scope: &str, msg: &str) {
    log(Level::Info, scope, msg);
}

/// Degraded operation: lost lines, missing config file.
pub fn warn(scope: &str, msg: &str) {
    log(Level::Warn, scope, msg);
}

/// A log file could not be opened; later lines are lost.
pub fn error(scope: &str, msg: &str) {
    log(Level::Error, scope, msg);
}
