//! Owns the single open log file and decides when to swap it for another.
//!
//! Two triggers exist. A record dated on another day than the open file starts
//! a new dated file and resets the line count. Otherwise, once the count reaches a
//! positive multiple of the segment size, the next write goes to
//! `<name>.<count / split_lines>` under the same date.

mod naming;

pub use naming::LogPath;

use crate::Error;
use chrono::NaiveDate;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

/// Why a file was swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationKind {
    Day,
    Segment,
}

/// How a line reached the file, which decides what a date change means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteSource {
    /// Written by the logging thread itself. Any other date rolls over, so the
    /// open file always matches the clock.
    Direct,
    /// Popped from the queue. Only a later date rolls over: a line queued
    /// before midnight and drained after must not reopen yesterday's file.
    Queued,
}

/// A pending swap, computed by [`RotationManager::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotation {
    pub kind: RotationKind,
    pub date: NaiveDate,
    pub segment: u64,
    pub path: PathBuf,
}

/// The currently open file and its counters.
///
/// `count` is the number of lines written since the logger started, reset only
/// when the day changes. `path`, `date` and `segment` always describe the same
/// file, even when opening it failed and `writer` is `None`.
#[derive(Debug)]
pub struct ActiveFile {
    path: PathBuf,
    date: NaiveDate,
    segment: u64,
    count: u64,
    writer: Option<BufWriter<File>>,
}

impl ActiveFile {
    /// Opens (or creates) `path` for appending.
    ///
    /// # Errors
    /// `Error::Open` if the file cannot be opened.
    pub fn open(path: PathBuf, date: NaiveDate) -> Result<Self, Error> {
        let writer = open_append(&path)?;
        Ok(Self {
            path,
            date,
            segment: 0,
            count: 0,
            writer: Some(writer),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub const fn segment(&self) -> u64 {
        self.segment
    }

    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// False after a failed rotation or after [`ActiveFile::close`].
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    /// Appends one rendered line; `count` only moves when the write succeeded.
    ///
    /// # Errors
    /// `Error::Write` when there is no open file or the write fails.
    pub fn write_line(&mut self, text: &str, auto_flush: bool) -> Result<(), Error> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| Error::Write(io::Error::other("no open log file")))?;

        writer.write_all(text.as_bytes()).map_err(Error::Write)?;
        self.count += 1;
        if auto_flush {
            writer.flush().map_err(Error::Write)?;
        }
        Ok(())
    }

    /// Pushes buffered bytes to the OS and syncs file data to the medium.
    ///
    /// # Errors
    /// I/O errors from flushing or syncing.
    pub fn flush(&mut self) -> Result<(), Error> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
            writer.get_ref().sync_data()?;
        }
        Ok(())
    }

    /// Flushes and drops the handle. Idempotent.
    pub fn close(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            if let Err(e) = writer.flush() {
                crate::internal::warn(
                    "ROTATE",
                    &format!("Flush on close failed for {}: {e}", self.path.display()),
                );
            }
        }
    }

    /// Closes the current file and opens the one described by `rotation`.
    ///
    /// Bookkeeping is updated before the open is attempted, so on failure the
    /// counters still match the (missing) file and writes fail until the next
    /// rotation succeeds.
    fn reopen(&mut self, rotation: &Rotation) -> Result<(), Error> {
        self.close();
        self.path.clone_from(&rotation.path);
        self.date = rotation.date;
        self.segment = rotation.segment;
        if rotation.kind == RotationKind::Day {
            self.count = 0;
        }
        self.writer = Some(open_append(&self.path)?);
        Ok(())
    }
}

fn open_append(path: &Path) -> Result<BufWriter<File>, Error> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(BufWriter::new)
        .map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Naming and segment size, fixed at init.
#[derive(Debug, Clone)]
pub struct RotationManager {
    path: LogPath,
    split_lines: NonZeroU64,
}

impl RotationManager {
    #[must_use]
    pub const fn new(path: LogPath, split_lines: NonZeroU64) -> Self {
        Self { path, split_lines }
    }

    #[must_use]
    pub const fn log_path(&self) -> &LogPath {
        &self.path
    }

    #[must_use]
    pub const fn split_lines(&self) -> u64 {
        self.split_lines.get()
    }

    /// Opens the first file of `date`.
    ///
    /// # Errors
    /// `Error::Open` if the file cannot be opened.
    pub fn open(&self, date: NaiveDate) -> Result<ActiveFile, Error> {
        ActiveFile::open(self.path.file_for(date, 0), date)
    }

    /// Decides whether a line dated `date` must go to a different file.
    ///
    /// Day rollover wins over segment rollover. See [`WriteSource`] for which
    /// date changes count. A segment that is already open is not reopened.
    #[must_use]
    pub fn check(
        &self,
        active: &ActiveFile,
        date: NaiveDate,
        source: WriteSource,
    ) -> Option<Rotation> {
        let new_day = match source {
            WriteSource::Direct => date != active.date,
            WriteSource::Queued => date > active.date,
        };
        if new_day {
            return Some(Rotation {
                kind: RotationKind::Day,
                date,
                segment: 0,
                path: self.path.file_for(date, 0),
            });
        }

        let count = active.count;
        let split = self.split_lines.get();
        if count > 0 && count % split == 0 {
            let segment = count / split;
            if segment != active.segment {
                return Some(Rotation {
                    kind: RotationKind::Segment,
                    date: active.date,
                    segment,
                    path: self.path.file_for(active.date, segment),
                });
            }
        }

        None
    }

    /// Applies `rotation` to `active`.
    ///
    /// # Errors
    /// `Error::Open` if the new file cannot be opened; `active` is then left
    /// without a handle.
    pub fn rotate(&self, active: &mut ActiveFile, rotation: &Rotation) -> Result<(), Error> {
        active.reopen(rotation)
    }

    /// Runs [`check`](Self::check) and applies the result.
    ///
    /// # Errors
    /// See [`rotate`](Self::rotate).
    pub fn before_write(
        &self,
        active: &mut ActiveFile,
        date: NaiveDate,
        source: WriteSource,
    ) -> Result<Option<Rotation>, Error> {
        match self.check(active, date, source) {
            Some(rotation) => {
                self.rotate(active, &rotation)?;
                Ok(Some(rotation))
            }
            None => Ok(None),
        }
    }
}
