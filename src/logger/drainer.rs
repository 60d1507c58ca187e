//! Background thread that moves queued lines to disk.

use super::state::Shared;
use crate::internal;
use crate::queue::DeliveryQueue;
use crate::rotation::WriteSource;
use std::io;
use std::sync::{Arc, PoisonError};
use std::thread::{self, JoinHandle};

/// Handle to the running drainer. Joined by `Logger::shutdown`.
pub(super) struct DrainerHandle {
    thread: Option<JoinHandle<()>>,
}

impl DrainerHandle {
    /// Waits for the drainer to empty the queue and exit.
    ///
    /// The caller must have set `shutting_down` and notified `work` first.
    pub(super) fn join(mut self) {
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                internal::error("DRAINER", "Drainer thread panicked");
            }
        }
    }
}

/// Starts the drainer on a named thread.
pub(super) fn spawn(shared: Arc<Shared>) -> io::Result<DrainerHandle> {
    let thread = thread::Builder::new()
        .name("daylog-drainer".into())
        .spawn(move || run(&shared))?;

    Ok(DrainerHandle {
        thread: Some(thread),
    })
}

/// Pops one line per lock acquisition so producers get a turn between writes.
/// Sleeps on `work` while the queue is empty; exits once shutdown has started
/// and nothing is left.
fn run(shared: &Shared) {
    internal::debug("DRAINER", "Drainer started");

    loop {
        let state = shared.lock();
        let mut state = shared
            .work
            .wait_while(state, |s| s.queue_is_empty() && !s.shutting_down)
            .unwrap_or_else(PoisonError::into_inner);

        let Some(line) = state.queue.as_mut().and_then(DeliveryQueue::pop) else {
            break;
        };
        state.write(&line, WriteSource::Queued);
        drop(state);
        shared.space.notify_one();
    }

    internal::debug("DRAINER", "Queue drained, drainer stopped");
}
