//! Helpers shared by the integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use daylog::Clock;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// A clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub fn at(year: i32, month: u32, day: u32) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(datetime(year, month, day)),
        })
    }

    pub fn set_date(&self, year: i32, month: u32, day: u32) {
        *self.now.lock().expect("clock lock poisoned") = datetime(year, month, day);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().expect("clock lock poisoned")
    }
}

pub fn datetime(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_hms_micro_opt(12, 30, 45, 123_456)
        .expect("valid time")
}

pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
        .lines()
        .map(ToString::to_string)
        .collect()
}

/// Log files in `dir`, ordered by date then segment.
pub fn log_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").path())
        .filter(|path| path.is_file())
        .collect();
    files.sort_by_key(|path| {
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        let (stem, segment) = match name.rsplit_once('.') {
            Some((stem, suffix)) if suffix.chars().all(|c| c.is_ascii_digit()) => {
                (stem.to_string(), suffix.parse::<u64>().expect("segment"))
            }
            _ => (name.clone(), 0),
        };
        (stem, segment)
    });
    files
}

pub fn total_lines(dir: &Path) -> usize {
    log_files(dir).iter().map(|path| read_lines(path).len()).sum()
}
