//! Handler trait for log output destinations

use super::{error::Result, log_entry::LogEntry, log_level::LogLevel};

pub trait Handler: Send {
    /// Lowest level this handler accepts
    fn level(&self) -> LogLevel {
        LogLevel::Debug
    }

    /// Gate on [`level`](Handler::level), then write
    ///
    /// Returns the rendered line when one was written.
    fn handle(&mut self, entry: &LogEntry) -> Result<Option<String>> {
        if entry.level < self.level() {
            return Ok(None);
        }
        self.write(entry)
    }

    /// Destination-specific write of one formatted entry
    ///
    /// Handlers that render text return the exact line they wrote;
    /// handlers that keep the entry in another form return `None`.
    fn write(&mut self, entry: &LogEntry) -> Result<Option<String>>;

    /// Release the destination; later writes are no-ops
    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}
