//! JSON lines formatter
//!
//! Writes each entry as a single-line JSON object, compatible with log
//! shippers that read JSONL.

use super::encode_or;
use super::line::{context_json, error_json};
use crate::core::{Formatter, LogEntry};
use chrono::SecondsFormat;

#[derive(Debug, Clone, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, entry: &LogEntry) -> String {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert(
            "timestamp".to_string(),
            serde_json::Value::String(entry.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)),
        );
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(entry.level.to_str().to_string()),
        );
        json_obj.insert(
            "channel".to_string(),
            serde_json::Value::String(entry.channel.clone()),
        );
        json_obj.insert("pid".to_string(), serde_json::Value::Number(entry.pid.into()));
        json_obj.insert(
            "message".to_string(),
            serde_json::Value::String(entry.message.clone()),
        );

        // Go through the same encoders as the line formatter so the
        // fallbacks match, then embed the result as an object.
        let context = serde_json::from_str(&context_json(entry.context()))
            .unwrap_or_else(|_| serde_json::Value::Object(Default::default()));
        let error = serde_json::from_str(&error_json(entry.error.as_ref()))
            .unwrap_or_else(|_| serde_json::Value::Object(Default::default()));
        json_obj.insert("context".to_string(), context);
        json_obj.insert("error".to_string(), error);

        let mut line = encode_or(&serde_json::Value::Object(json_obj), || {
            serde_json::json!({ "message": entry.message }).to_string()
        });
        line.push('\n');
        line
    }

    fn name(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ErrorReport, LogContext, LogLevel};

    #[test]
    fn test_json_line_shape() {
        let entry = LogEntry::new(
            LogLevel::Warning,
            "disk\nalmost full",
            "ops",
            LogContext::new().with_field("used", 0.93),
        );

        let line = JsonFormatter::new().format(&entry);
        assert_eq!(line.matches('\n').count(), 1);

        let parsed: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(parsed["level"], "WARNING");
        assert_eq!(parsed["channel"], "ops");
        assert_eq!(parsed["message"], "disk\nalmost full");
        assert_eq!(parsed["context"]["used"], 0.93);
        assert_eq!(parsed["error"], serde_json::json!({}));
    }

    #[test]
    fn test_json_error_object() {
        let entry = LogEntry::new(
            LogLevel::Error,
            "failed",
            "ops",
            LogContext::new().with_error(ErrorReport::msg("timeout").with_code(504)),
        );

        let line = JsonFormatter::new().format(&entry);
        let parsed: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(parsed["error"]["message"], "timeout");
        assert_eq!(parsed["error"]["code"], 504);
        assert_eq!(parsed["context"], serde_json::json!({}));
    }
}
