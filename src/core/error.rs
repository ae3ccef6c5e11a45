//! Error types for the logger system

use super::log_entry::LogEntry;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Invalid configuration, e.g. an unknown level name
    #[error("Invalid configuration for {component}: {message}")]
    Configuration { component: String, message: String },

    /// A processor could not be registered
    #[error("Invalid processor for scope '{scope}': {message}")]
    InvalidProcessor { scope: String, message: String },

    /// A destination could not be opened or interpreted
    #[error("Cannot open log destination '{target}': {message}")]
    Destination { target: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    Io {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A handler failed to write an accepted entry; the entry is kept
    #[error(
        "Failed to deliver {} entry on channel '{}' to {handler}: {source}",
        .entry.level,
        .entry.channel
    )]
    Delivery {
        handler: String,
        entry: Box<LogEntry>,
        #[source]
        source: Box<LoggerError>,
    },

    /// JSON error while reading configuration
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Configuration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an invalid processor error
    pub fn invalid_processor(scope: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidProcessor {
            scope: scope.into(),
            message: message.into(),
        }
    }

    /// Create a destination error
    pub fn destination(target: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Destination {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::Io {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Wrap a handler failure together with the entry it was writing
    pub fn delivery(handler: impl Into<String>, entry: &LogEntry, source: LoggerError) -> Self {
        LoggerError::Delivery {
            handler: handler.into(),
            entry: Box::new(entry.clone()),
            source: Box::new(source),
        }
    }

    /// True for failures writing to an open destination
    pub fn is_io(&self) -> bool {
        match self {
            LoggerError::Io { .. } => true,
            LoggerError::Delivery { source, .. } => source.is_io(),
            _ => false,
        }
    }
}
