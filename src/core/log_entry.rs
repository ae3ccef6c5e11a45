//! Log entry structure

use super::error_record::ErrorRecord;
use super::log_context::LogContext;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};

/// One log event, created once per accepted `log` call
///
/// Level, message and the captured metadata never change after
/// construction. The context is only replaced by the processor chain.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub channel: String,
    pub pid: u32,
    pub timestamp: DateTime<Utc>,
    pub error: Option<ErrorRecord>,
    context: LogContext,
}

impl LogEntry {
    /// Build an entry for `channel`, lifting any error out of `context`
    pub fn new(
        level: LogLevel,
        message: impl Into<String>,
        channel: impl Into<String>,
        mut context: LogContext,
    ) -> Self {
        let error = context.take_error();
        Self {
            level,
            message: message.into(),
            channel: channel.into(),
            pid: std::process::id(),
            timestamp: Utc::now(),
            error,
            context,
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_pid(mut self, pid: u32) -> Self {
        self.pid = pid;
        self
    }

    pub fn context(&self) -> &LogContext {
        &self.context
    }

    pub(crate) fn take_context(&mut self) -> LogContext {
        std::mem::take(&mut self.context)
    }

    pub(crate) fn set_context(&mut self, context: LogContext) {
        self.context = context;
    }
}
