//! Stream handler writing to files or already-open file handles
//!
//! Every write takes an exclusive advisory lock on the file for the
//! duration of that single write, so concurrent writers (threads holding
//! their own handle, or other processes) never interleave inside a line.

use crate::core::{Formatter, FormatterAware, Handler, LogEntry, LogLevel, LoggerError, Result};
use crate::formatters::LineFormatter;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const FILE_SCHEME: &str = "file://";

/// Where a [`StreamHandler`] writes
#[derive(Debug)]
pub enum StreamTarget {
    /// Path or `file://` URL, opened in append mode
    Path(String),
    /// Already-open handle supplied by the caller
    File(File),
}

impl From<&str> for StreamTarget {
    fn from(path: &str) -> Self {
        StreamTarget::Path(path.to_string())
    }
}

impl From<String> for StreamTarget {
    fn from(path: String) -> Self {
        StreamTarget::Path(path)
    }
}

impl From<&Path> for StreamTarget {
    fn from(path: &Path) -> Self {
        StreamTarget::Path(path.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for StreamTarget {
    fn from(path: PathBuf) -> Self {
        StreamTarget::from(path.as_path())
    }
}

impl From<&PathBuf> for StreamTarget {
    fn from(path: &PathBuf) -> Self {
        StreamTarget::from(path.as_path())
    }
}

impl From<File> for StreamTarget {
    fn from(file: File) -> Self {
        StreamTarget::File(file)
    }
}

pub struct StreamHandler {
    file: Option<File>,
    target: String,
    formatter: Box<dyn Formatter>,
    level: LogLevel,
}

impl StreamHandler {
    /// Open a destination, using a [`LineFormatter`] unless one is given
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use channel_logger::handlers::StreamHandler;
    ///
    /// let handler = StreamHandler::new("/var/log/app.log", None).unwrap();
    /// assert_eq!(handler.target(), "file:///var/log/app.log");
    /// ```
    pub fn new(
        target: impl Into<StreamTarget>,
        formatter: Option<Box<dyn Formatter>>,
    ) -> Result<Self> {
        let (file, target) = Self::open_stream(target.into())?;
        Ok(Self {
            file: Some(file),
            target,
            formatter: formatter.unwrap_or_else(|| Box::new(LineFormatter::new())),
            level: LogLevel::Debug,
        })
    }

    /// Only write entries at `level` or above
    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// The destination, as a `file://` URL for path targets
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn is_closed(&self) -> bool {
        self.file.is_none()
    }

    fn open_stream(target: StreamTarget) -> Result<(File, String)> {
        match target {
            StreamTarget::File(file) => Ok((file, "stream".to_string())),
            StreamTarget::Path(raw) => {
                let url = if raw.contains("://") {
                    raw.clone()
                } else {
                    format!("{}{}", FILE_SCHEME, raw)
                };
                let path = url.strip_prefix(FILE_SCHEME).ok_or_else(|| {
                    LoggerError::destination(&raw, "only file:// destinations can be opened")
                })?;
                if path.trim().is_empty() {
                    return Err(LoggerError::destination(&raw, "empty path"));
                }

                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| LoggerError::destination(&url, e.to_string()))?;
                Ok((file, url))
            }
        }
    }
}

impl FormatterAware for StreamHandler {
    fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }

    fn set_formatter(&mut self, formatter: Box<dyn Formatter>) {
        self.formatter = formatter;
    }
}

impl Handler for StreamHandler {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn write(&mut self, entry: &LogEntry) -> Result<Option<String>> {
        let Some(file) = self.file.as_mut() else {
            return Ok(None);
        };
        let line = self.formatter.format(entry);

        file.lock_exclusive().map_err(|e| {
            LoggerError::io_operation("locking log destination", self.target.clone(), e)
        })?;
        let written = file.write_all(line.as_bytes());
        let unlocked = FileExt::unlock(&*file);

        written.map_err(|e| {
            LoggerError::io_operation("writing log entry", self.target.clone(), e)
        })?;
        unlocked.map_err(|e| {
            LoggerError::io_operation("unlocking log destination", self.target.clone(), e)
        })?;
        Ok(Some(line))
    }

    fn close(&mut self) -> Result<()> {
        // Dropping the handle closes it; a second close finds nothing
        drop(self.file.take());
        Ok(())
    }

    fn name(&self) -> &str {
        "stream"
    }
}

impl Drop for StreamHandler {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            eprintln!("[LOGGER ERROR] Failed to close {}: {}", self.target, e);
        }
    }
}
