//! `daylog` - leveled file logging with daily and line-count rotation.
//!
//! - One file per day: `logs/2024_05_01_server.log`
//! - Line-count segments within a day: `logs/2024_05_01_server.log.1`, `.2`, ...
//! - Optional asynchronous mode: a bounded queue drained by a background thread
//! - Lines bounded to a configured size, never split mid-character
//!
//! # Example
//!
//! ```no_run
//! use daylog::{Level, Logger};
//!
//! # fn main() -> Result<(), daylog::Error> {
//! let logger = Logger::builder()
//!     .path("logs/server.log")
//!     .queue_capacity(1024)
//!     .build()?;
//!
//! logger.info("server started");
//! daylog::warn!(logger, "disk usage at {}%", 91);
//! logger.log(Level::Error, "connection refused");
//! logger.flush()?;
//! # Ok(())
//! # }
//! ```

mod macros;

pub mod clock;
pub mod config;
mod error;
pub mod fmt;
pub mod global;
pub mod internal;
pub mod level;
pub mod logger;
pub mod queue;
pub mod rotation;

pub use clock::{Clock, SystemClock};
pub use config::Config;
pub use error::Error;
pub use level::Level;
pub use logger::{Logger, LoggerBuilder};
pub use queue::OverflowPolicy;
