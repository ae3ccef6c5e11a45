//! Core logger types and traits

pub mod config;
pub mod environment;
pub mod error;
pub mod error_record;
pub mod formatter;
pub mod handler;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod processor;

pub use config::LoggerConfig;
pub use environment::{ErrorReporter, PathResolver, ResolveMode, StderrReporter, StorageRoot};
pub use error::{LoggerError, Result};
pub use error_record::{ErrorRecord, ErrorReport, ReportableError, EXCEPTION_KEY};
pub use formatter::{Formatter, FormatterAware};
pub use handler::Handler;
pub use log_context::{ContextGuard, FieldValue, LogContext, LoggerContext};
pub use log_entry::LogEntry;
pub use log_level::{should_log, LevelFilter, LogLevel};
pub use logger::{Logger, LoggerBuilder, LOG_DIR};
pub use processor::{processor, Processor, ProcessorChain, ProcessorRegistry};
