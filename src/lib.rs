//! # Channel Logger
//!
//! A synchronous, channel-based structured logger.
//!
//! ## Features
//!
//! - **Severity Filtering**: Eight levels plus a `none` minimum that silences a logger
//! - **Structured Context**: Ordered key/value fields and structured error records
//! - **Processors**: Per-channel chains that enrich the context before formatting
//! - **Safe File Appends**: Each write holds an exclusive file lock, one line per entry
//!
//! ```
//! use channel_logger::prelude::*;
//!
//! let logger = Logger::builder()
//!     .channel("app")
//!     .min_level(LogLevel::Info)
//!     .build()?;
//!
//! logger.info("user created", log_context! { "id" => 42 })?;
//! # Ok::<(), LoggerError>(())
//! ```

pub mod core;
pub mod formatters;
pub mod handlers;
pub mod macros;
pub mod processors;

pub mod prelude {
    pub use crate::core::{
        processor, ErrorRecord, ErrorReport, FieldValue, Formatter, FormatterAware, Handler,
        LevelFilter, LogContext, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerConfig,
        LoggerContext, LoggerError, PathResolver, Processor, ProcessorRegistry, ReportableError,
        ResolveMode, Result, StorageRoot,
    };
    pub use crate::formatters::{JsonFormatter, LineFormatter, Timezone};
    pub use crate::handlers::{EchoHandler, StreamHandler};
    pub use crate::log_context;
    pub use crate::processors;
}

pub use core::{
    processor, should_log, ErrorRecord, ErrorReport, FieldValue, Formatter, FormatterAware,
    Handler, LevelFilter, LogContext, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerConfig,
    LoggerContext, LoggerError, Processor, ProcessorRegistry, ReportableError, Result,
};
pub use formatters::{JsonFormatter, LineFormatter};
pub use handlers::{EchoHandler, StreamHandler};
