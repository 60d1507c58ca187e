//! Bounded FIFO between producer threads and the drainer.

use chrono::NaiveDate;
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

/// A finished line plus the date it was logged on, which the rotation check needs
/// at write time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedLine {
    pub date: NaiveDate,
    pub text: String,
}

/// What a producer does when the queue is at capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Write the line to the file directly. Never blocks, but the line can land
    /// before older lines that are still queued.
    #[default]
    WriteThrough,
    /// Wait until the drainer frees a slot. Keeps strict FIFO order.
    Block,
}

impl OverflowPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WriteThrough => "write-through",
            Self::Block => "block",
        }
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` for unknown policy names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePolicyError(String);

impl fmt::Display for ParsePolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown overflow policy: '{}'", self.0)
    }
}

impl std::error::Error for ParsePolicyError {}

impl FromStr for OverflowPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "write-through" | "writethrough" | "sync" => Ok(Self::WriteThrough),
            "block" | "wait" => Ok(Self::Block),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

/// Never holds more than `capacity` lines.
#[derive(Debug)]
pub struct DeliveryQueue {
    lines: VecDeque<QueuedLine>,
    capacity: usize,
}

impl DeliveryQueue {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `line`, or hands it back when the queue is full.
    ///
    /// # Errors
    /// The rejected line, so the caller can write it elsewhere.
    pub fn try_push(&mut self, line: QueuedLine) -> Result<(), QueuedLine> {
        if self.is_full() {
            return Err(line);
        }
        self.lines.push_back(line);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<QueuedLine> {
        self.lines.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.lines.len() >= self.capacity
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}
