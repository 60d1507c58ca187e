//! Everything mutable behind the logger's one lock.

use crate::internal;
use crate::queue::{DeliveryQueue, OverflowPolicy, QueuedLine};
use crate::rotation::{ActiveFile, RotationManager, WriteSource};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

pub(super) struct State {
    pub(super) rotation: RotationManager,
    pub(super) active: ActiveFile,
    /// `None` in synchronous mode.
    pub(super) queue: Option<DeliveryQueue>,
    pub(super) auto_flush: bool,
    pub(super) shutting_down: bool,
    pub(super) closed: bool,
    pub(super) write_failures: u64,
    /// Lines written directly because the queue was full.
    pub(super) overflow_writes: u64,
}

impl State {
    pub(super) fn new(
        rotation: RotationManager,
        active: ActiveFile,
        queue: Option<DeliveryQueue>,
        auto_flush: bool,
    ) -> Self {
        Self {
            rotation,
            active,
            queue,
            auto_flush,
            shutting_down: false,
            closed: false,
            write_failures: 0,
            overflow_writes: 0,
        }
    }

    pub(super) fn queue_is_empty(&self) -> bool {
        self.queue.as_ref().is_none_or(DeliveryQueue::is_empty)
    }

    fn queue_is_full(&self) -> bool {
        self.queue.as_ref().is_some_and(DeliveryQueue::is_full)
    }

    /// Rotation check, then one physical write.
    pub(super) fn write(&mut self, line: &QueuedLine, source: WriteSource) {
        match self
            .rotation
            .before_write(&mut self.active, line.date, source)
        {
            Ok(Some(rotation)) => internal::debug(
                "ROTATE",
                &format!(
                    "{:?} rollover, now writing {}",
                    rotation.kind,
                    rotation.path.display()
                ),
            ),
            Ok(None) => {}
            Err(e) => internal::error("ROTATE", &e.to_string()),
        }

        if let Err(e) = self.active.write_line(&line.text, self.auto_flush) {
            self.write_failures += 1;
            // First failure, then every power of two, to keep a dead disk from flooding stderr.
            if self.write_failures.is_power_of_two() {
                internal::warn(
                    "WRITE",
                    &format!("{e} ({} lines lost so far)", self.write_failures),
                );
            }
        }
    }

    /// Writes out every queued line in FIFO order.
    pub(super) fn drain(&mut self) {
        while let Some(line) = self.queue.as_mut().and_then(DeliveryQueue::pop) {
            self.write(&line, WriteSource::Queued);
        }
    }

    pub(super) fn close(&mut self) {
        self.active.close();
        self.closed = true;
    }
}

/// The lock plus its two wake-up channels.
pub(super) struct Shared {
    state: Mutex<State>,
    /// Signalled on push and on shutdown; the drainer waits on it.
    pub(super) work: Condvar,
    /// Signalled on pop and on shutdown; blocked producers wait on it.
    pub(super) space: Condvar,
}

impl Shared {
    pub(super) fn new(state: State) -> Self {
        Self {
            state: Mutex::new(state),
            work: Condvar::new(),
            space: Condvar::new(),
        }
    }

    /// A panic on another thread must not take logging down with it.
    pub(super) fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues `line` or writes it directly, depending on mode, policy and fill level.
    pub(super) fn deliver(&self, line: QueuedLine, policy: OverflowPolicy) {
        let mut state = self.lock();
        if state.closed {
            internal::debug("LOGGER", "Line dropped: logger already shut down");
            return;
        }

        if policy == OverflowPolicy::Block {
            state = self
                .space
                .wait_while(state, |s| !s.shutting_down && s.queue_is_full())
                .unwrap_or_else(PoisonError::into_inner);
            if state.closed {
                return;
            }
        }

        let queued = !state.shutting_down && state.queue.is_some();
        let pushed = if !queued {
            Err(line)
        } else if let Some(queue) = state.queue.as_mut() {
            queue.try_push(line)
        } else {
            Err(line)
        };

        match pushed {
            Ok(()) => {
                drop(state);
                self.work.notify_one();
            }
            Err(line) => {
                if queued {
                    state.overflow_writes += 1;
                }
                state.write(&line, WriteSource::Direct);
            }
        }
    }
}
