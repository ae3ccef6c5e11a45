//! Echo handler writing formatted entries to standard output

use crate::core::{Formatter, FormatterAware, Handler, LogEntry, LogLevel, LoggerError, Result};
use crate::formatters::LineFormatter;
use std::io::{Stdout, Write};

/// Writes each formatted entry to stdout, without file locking
///
/// The writer is generic so output can be captured; [`EchoHandler::new`]
/// targets the process's stdout.
pub struct EchoHandler<W: Write + Send = Stdout> {
    writer: W,
    formatter: Box<dyn Formatter>,
    level: LogLevel,
}

impl EchoHandler<Stdout> {
    pub fn new() -> Self {
        Self::with_writer(std::io::stdout())
    }
}

impl Default for EchoHandler<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> EchoHandler<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            formatter: Box::new(LineFormatter::new()),
            level: LogLevel::Debug,
        }
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Write an already rendered line
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer
            .write_all(line.as_bytes())
            .and_then(|()| self.writer.flush())
            .map_err(|e| LoggerError::io_operation("echoing log entry", "stdout", e))
    }
}

impl<W: Write + Send> FormatterAware for EchoHandler<W> {
    fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }

    fn set_formatter(&mut self, formatter: Box<dyn Formatter>) {
        self.formatter = formatter;
    }
}

impl<W: Write + Send> Handler for EchoHandler<W> {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn write(&mut self, entry: &LogEntry) -> Result<Option<String>> {
        let line = self.formatter.format(entry);
        self.write_line(&line)?;
        Ok(Some(line))
    }

    fn name(&self) -> &str {
        "echo"
    }
}
