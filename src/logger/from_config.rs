//! Logger construction from a parsed [`Config`].

use super::{Logger, LoggerBuilder};
use crate::Error;
use crate::config::Config;
use crate::internal;

impl Logger {
    /// Builds a logger from `config`. Also applies `general.internal_level` to
    /// the diagnostics channel.
    ///
    /// # Errors
    /// Anything [`LoggerBuilder::build`] returns.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        internal::set_level(config.parse_internal_level());
        internal::debug("LOGGER", "Building logger from config");

        Self::builder_from_config(config).build()
    }

    /// Same as [`Logger::from_config`] but stops before opening the file, so
    /// callers can still swap the clock or override options.
    #[must_use]
    pub fn builder_from_config(config: &Config) -> LoggerBuilder {
        LoggerBuilder::new()
            .path(config.resolved_path())
            .enabled(config.general.enabled)
            .buffer_capacity(config.file.buffer_capacity)
            .split_lines(config.file.split_lines)
            .queue_capacity(config.file.queue_capacity)
            .overflow(config.parse_overflow())
            .auto_flush(config.file.auto_flush)
    }
}
