//! Serializable logger configuration
//!
//! ```
//! use channel_logger::core::LoggerConfig;
//!
//! let config = LoggerConfig::from_json_str(r#"{"channel": "worker", "level": "notice"}"#).unwrap();
//! assert_eq!(config.channel, "worker");
//! assert!(!config.output);
//! ```

use super::environment::StorageRoot;
use super::error::{LoggerError, Result};
use super::logger::{parse_level, resolve_log_file, Logger};
use crate::formatters::{LineFormatter, Timezone};
use crate::handlers::StreamHandler;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub channel: String,
    /// Minimum level name, `none` to disable
    pub level: String,
    /// Base name of the dated log file; requires `storage_root`
    pub log_file: Option<String>,
    pub storage_root: Option<PathBuf>,
    /// Echo lines to stdout
    pub output: bool,
    pub timezone: Timezone,
    /// Built-in processor names
    pub processors: Vec<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            channel: "app".to_string(),
            level: "debug".to_string(),
            log_file: None,
            storage_root: None,
            output: false,
            timezone: Timezone::default(),
            processors: Vec::new(),
        }
    }
}

impl LoggerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a logger from this configuration
    pub fn build(&self) -> Result<Logger> {
        let reporter = Arc::new(super::environment::StderrReporter);
        let min_level = parse_level(reporter.as_ref(), &self.level)?;
        let formatter = LineFormatter::new().with_timezone(self.timezone);

        let mut builder = Logger::builder()
            .channel(self.channel.clone())
            .min_level(min_level)
            .output(self.output)
            .echo_formatter(formatter.clone())
            .reporter(reporter);

        match (&self.log_file, &self.storage_root) {
            (Some(log_file), Some(root)) => {
                let path = resolve_log_file(&StorageRoot::new(root), log_file)?;
                builder = builder.handler(StreamHandler::new(&path, Some(Box::new(formatter)))?);
            }
            (Some(_), None) => {
                return Err(LoggerError::config(
                    "LoggerConfig",
                    "log_file requires storage_root",
                ))
            }
            (None, _) => {}
        }

        let logger = builder.build()?;
        if !self.processors.is_empty() {
            logger
                .processors()
                .register_named(&self.channel, &self.processors)?;
        }
        Ok(logger)
    }
}

impl Logger {
    pub fn from_config(config: &LoggerConfig) -> Result<Logger> {
        config.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LevelFilter, LogContext, LogLevel};
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, LoggerConfig::default());

        let logger = Logger::from_config(&config).unwrap();
        assert_eq!(logger.channel(), "app");
        assert_eq!(logger.min_level(), LevelFilter::Level(LogLevel::Debug));
        assert_eq!(logger.handler_count(), 0);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = LoggerConfig::from_json_str(r#"{"levle": "info"}"#).unwrap_err();
        assert!(matches!(err, LoggerError::Json(_)));
    }

    #[test]
    fn test_invalid_level() {
        let config = LoggerConfig {
            level: "bogus".to_string(),
            ..LoggerConfig::default()
        };
        let err = Logger::from_config(&config).err().unwrap();
        assert!(matches!(err, LoggerError::Configuration { .. }));
    }

    #[test]
    fn test_log_file_requires_root() {
        let config = LoggerConfig {
            log_file: Some("app".to_string()),
            ..LoggerConfig::default()
        };
        assert!(Logger::from_config(&config).is_err());
    }

    #[test]
    fn test_file_logger_from_config() {
        let dir = tempdir().unwrap();
        let json = format!(
            r#"{{"channel": "jobs", "level": "info", "log_file": "jobs",
                "storage_root": {:?}, "timezone": "utc", "processors": ["pid"]}}"#,
            dir.path().to_str().unwrap()
        );
        let config = LoggerConfig::from_json_str(&json).unwrap();
        let logger = Logger::from_config(&config).unwrap();

        logger.debug("hidden", LogContext::new()).unwrap();
        logger.info("visible", LogContext::new()).unwrap();

        let log_dir = dir.path().join("Storage/log");
        let files: Vec<_> = std::fs::read_dir(&log_dir).unwrap().collect();
        assert_eq!(files.len(), 1);

        let path = files[0].as_ref().unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(name.ends_with("-jobs.txt"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("\t[INFO]\t[jobs]\t"));
        assert!(content.contains(&format!("{{\"pid\":{}}}", std::process::id())));
    }

    #[test]
    fn test_unknown_processor_name() {
        let config = LoggerConfig {
            processors: vec!["memory".to_string()],
            ..LoggerConfig::default()
        };
        let err = Logger::from_config(&config).err().unwrap();
        assert!(matches!(err, LoggerError::InvalidProcessor { .. }));
    }
}
