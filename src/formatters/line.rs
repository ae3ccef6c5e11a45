//! Tab-separated line formatter
//!
//! ```text
//! YYYY-MM-DD HH:MM:SS.ffffff  [LEVEL]  [channel]  [pid:N]  message  {"context":"json"}  {"error":"json"}
//! ```
//!
//! Fields are separated by a single tab and every entry occupies exactly one
//! line, so files can be tailed and split line by line.

use super::{encode_or, single_line};
use crate::core::{ErrorRecord, Formatter, LogContext, LogEntry};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

const TAB: char = '\t';

/// Fixed, lexicographically sortable timestamp shape
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Timezone used when rendering timestamps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timezone {
    #[default]
    Local,
    Utc,
}

impl Timezone {
    pub fn format(&self, timestamp: &DateTime<Utc>) -> String {
        match self {
            Timezone::Local => timestamp
                .with_timezone(&Local)
                .format(TIMESTAMP_FORMAT)
                .to_string(),
            Timezone::Utc => timestamp.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LineFormatter {
    timezone: Timezone,
}

impl LineFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn timezone(&self) -> Timezone {
        self.timezone
    }
}

impl Formatter for LineFormatter {
    fn format(&self, entry: &LogEntry) -> String {
        let message = single_line(entry.message.trim()).replace(TAB, " ");
        let channel = single_line(&entry.channel).replace(TAB, " ");
        let context = single_line(&context_json(entry.context()));
        let error = single_line(&error_json(entry.error.as_ref()));

        let mut line = String::with_capacity(
            64 + channel.len() + message.len() + context.len() + error.len(),
        );
        line.push_str(&self.timezone.format(&entry.timestamp));
        line.push(TAB);
        line.push_str(&format!("[{}]", entry.level));
        line.push(TAB);
        line.push_str(&format!("[{}]", channel));
        line.push(TAB);
        line.push_str(&format!("[pid:{}]", entry.pid));
        line.push(TAB);
        line.push_str(&message);
        line.push(TAB);
        line.push_str(&context);
        line.push(TAB);
        line.push_str(&error);
        line.push('\n');
        line
    }

    fn name(&self) -> &str {
        "line"
    }
}

/// Context as a JSON object, `{}` when empty or unserializable
pub fn context_json(context: &LogContext) -> String {
    if context.is_empty() {
        return "{}".to_string();
    }
    encode_or(context, || "{}".to_string())
}

/// Error record as a JSON object, `{}` when absent
///
/// Falls back to an object holding only the message.
pub fn error_json(error: Option<&ErrorRecord>) -> String {
    match error {
        None => "{}".to_string(),
        Some(record) => encode_or(record, || {
            serde_json::json!({ "message": record.message }).to_string()
        }),
    }
}
