//! Wall-clock source for timestamps and day-rollover decisions.

use chrono::{Local, NaiveDateTime};
use std::sync::Arc;

/// Anything that can tell the local time.
///
/// The logger asks its clock once per record; the date part drives day rollover
/// and the full value is printed in the header. Tests substitute their own
/// implementation to step across midnight.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// Local time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
