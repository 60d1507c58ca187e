//! Renders one record into a finished, size-bounded line.

use crate::level::Level;
use chrono::NaiveDateTime;
use std::fmt::{self, Write};

/// `strftime` pattern for the header; `%.6f` yields `.ffffff`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Byte length of `YYYY-MM-DD HH:MM:SS.ffffff ` plus the level tag.
pub const HEADER_LEN: usize = 27 + Level::TAG_WIDTH;

/// Smallest buffer that still fits the full header and the newline.
pub const MIN_CAPACITY: usize = HEADER_LEN + 1;

/// Appends to a `String` until `limit` bytes, then refuses further input.
///
/// Returning `fmt::Error` once the limit is hit stops `write_fmt` from
/// formatting the rest of the arguments.
struct Bounded<'a> {
    buf: &'a mut String,
    limit: usize,
}

impl Write for Bounded<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let remaining = self.limit.saturating_sub(self.buf.len());
        if s.len() <= remaining {
            self.buf.push_str(s);
            return Ok(());
        }

        let mut end = remaining;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        self.buf.push_str(&s[..end]);
        Err(fmt::Error)
    }
}

/// Renders `<timestamp> <tag><message>\n`.
///
/// The header is written in full; the message is cut (on a character boundary)
/// so that the whole line, newline included, is at most `capacity` bytes. A
/// `capacity` below [`MIN_CAPACITY`] still yields the complete header.
#[must_use]
pub fn render_line(
    timestamp: &NaiveDateTime,
    level: Level,
    args: fmt::Arguments<'_>,
    capacity: usize,
) -> String {
    let mut line = String::with_capacity(HEADER_LEN + 64);
    let _ = write!(line, "{} {}", timestamp.format(TIMESTAMP_FORMAT), level.tag());

    let limit = capacity.saturating_sub(1).max(line.len());
    let mut bounded = Bounded {
        buf: &mut line,
        limit,
    };
    // Err only means the message was truncated.
    let _ = bounded.write_fmt(args);

    line.push('\n');
    line
}

/// Same as [`render_line`] for an already-formatted message.
#[must_use]
pub fn render_str(timestamp: &NaiveDateTime, level: Level, msg: &str, capacity: usize) -> String {
    render_line(timestamp, level, format_args!("{msg}"), capacity)
}
