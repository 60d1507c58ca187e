//! Splits the configured base path and derives dated file names from it.

use crate::Error;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory plus undated base name, e.g. `logs/` + `server.log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogPath {
    dir: PathBuf,
    base_name: String,
}

impl LogPath {
    /// Splits `base` at its last separator.
    ///
    /// A bare name (`server.log`) resolves against the working directory.
    ///
    /// # Errors
    /// `Error::InvalidPath` when the path ends in a separator, has no file name
    /// component, or the name is not valid UTF-8.
    pub fn parse(base: impl AsRef<Path>) -> Result<Self, Error> {
        let base = base.as_ref();
        let raw = base.to_string_lossy();
        if raw.is_empty() || raw.ends_with('/') || raw.ends_with(std::path::MAIN_SEPARATOR) {
            return Err(Error::InvalidPath(format!("{raw}: missing file name")));
        }

        let base_name = base
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::InvalidPath(format!("{raw}: missing file name")))?
            .to_string();
        let dir = base.parent().map(Path::to_path_buf).unwrap_or_default();

        Ok(Self { dir, base_name })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// `<dir>/<YYYY>_<MM>_<DD>_<base>` for segment 0, with `.<segment>` appended otherwise.
    #[must_use]
    pub fn file_for(&self, date: NaiveDate, segment: u64) -> PathBuf {
        let mut name = format!("{}_{}", date.format("%Y_%m_%d"), self.base_name);
        if segment > 0 {
            name.push('.');
            name.push_str(&segment.to_string());
        }
        self.dir.join(name)
    }

    /// Creates the directory if it does not exist yet.
    ///
    /// # Errors
    /// The underlying I/O error from `create_dir_all`.
    pub fn ensure_dir(&self) -> Result<(), Error> {
        if self.dir.as_os_str().is_empty() || self.dir.exists() {
            return Ok(());
        }
        fs::create_dir_all(&self.dir)?;
        crate::internal::debug(
            "ROTATE",
            &format!("Created directory: {}", self.dir.display()),
        );
        Ok(())
    }
}
