//! Formatter trait for rendering entries to text

use super::log_entry::LogEntry;

/// Renders a log entry to a single line of text, newline included
///
/// Implementations must be pure with respect to the entry: formatting the
/// same entry twice yields the same bytes.
pub trait Formatter: Send + Sync {
    fn format(&self, entry: &LogEntry) -> String;

    fn name(&self) -> &str;
}

/// A component holding a replaceable formatter
pub trait FormatterAware {
    fn formatter(&self) -> &dyn Formatter;

    /// Takes effect from the next write
    fn set_formatter(&mut self, formatter: Box<dyn Formatter>);
}
