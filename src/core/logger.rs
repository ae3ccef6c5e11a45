//! Main logger implementation
//!
//! Logging is synchronous: a call returns once every handler has formatted
//! and written the entry. Nothing is queued or batched.

use super::{
    environment::{ErrorReporter, PathResolver, ResolveMode, StderrReporter},
    error::{LoggerError, Result},
    formatter::Formatter,
    handler::Handler,
    log_context::LogContext,
    log_entry::LogEntry,
    log_level::{should_log, LevelFilter, LogLevel},
    processor::{Processor, ProcessorRegistry},
};
use crate::formatters::LineFormatter;
use crate::handlers::{EchoHandler, StreamHandler};
use chrono::Local;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Directory, relative to the storage root, holding file logs
pub const LOG_DIR: &str = "Storage/log";

/// Status code handed to the [`ErrorReporter`] for configuration failures
pub const CONFIG_ERROR_STATUS: u16 = 500;

type EchoWriter = Box<dyn Write + Send>;

fn stdout_writer() -> EchoWriter {
    Box::new(std::io::stdout())
}

pub struct Logger {
    channel: RwLock<String>,
    min_level: RwLock<LevelFilter>,
    handlers: Mutex<Vec<Box<dyn Handler>>>,
    echo_enabled: AtomicBool,
    echo: Mutex<EchoHandler<EchoWriter>>,
    processors: ProcessorRegistry,
    reporter: Arc<dyn ErrorReporter>,
}

impl Logger {
    /// A logger for `channel` with no handlers, accepting every level
    #[must_use]
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: RwLock::new(channel.into()),
            min_level: RwLock::new(LevelFilter::default()),
            handlers: Mutex::new(Vec::new()),
            echo_enabled: AtomicBool::new(false),
            echo: Mutex::new(EchoHandler::with_writer(stdout_writer())),
            processors: ProcessorRegistry::new(),
            reporter: Arc::new(StderrReporter),
        }
    }

    /// The built-in file logger
    ///
    /// Resolves `Storage/log/<YYYY-mm-dd.HH-MM-SS>-<log_file>.txt` once, so
    /// every entry of this logger goes to the same file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use channel_logger::prelude::*;
    ///
    /// let logger = Logger::file("app", "errors", "warning", &StorageRoot::new("/srv/app"))?;
    /// logger.error("payment declined", log_context! { "order" => 1017 })?;
    /// # Ok::<(), LoggerError>(())
    /// ```
    pub fn file(
        channel: impl Into<String>,
        log_file: &str,
        level: &str,
        resolver: &dyn PathResolver,
    ) -> Result<Self> {
        let reporter: Arc<dyn ErrorReporter> = Arc::new(StderrReporter);
        let min_level = parse_level(reporter.as_ref(), level)?;
        let path = resolve_log_file(resolver, log_file)?;
        let handler = StreamHandler::new(&path, Some(Box::new(LineFormatter::new())))?;

        Logger::builder()
            .channel(channel)
            .min_level(min_level)
            .reporter(reporter)
            .handler(handler)
            .build()
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn add_handler(&self, handler: Box<dyn Handler>) {
        self.handlers.lock().push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.lock().len()
    }

    /// Set the lowest level to log by name, `none` disabling logging
    pub fn set_log_level(&self, name: &str) -> Result<()> {
        let level = parse_level(self.reporter.as_ref(), name)?;
        self.set_min_level(level);
        Ok(())
    }

    pub fn set_min_level(&self, level: impl Into<LevelFilter>) {
        *self.min_level.write() = level.into();
    }

    pub fn min_level(&self) -> LevelFilter {
        *self.min_level.read()
    }

    pub fn set_channel(&self, channel: impl Into<String>) {
        *self.channel.write() = channel.into();
    }

    pub fn channel(&self) -> String {
        self.channel.read().clone()
    }

    /// Also print every written line to stdout
    pub fn set_output(&self, enabled: bool) {
        self.echo_enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn output(&self) -> bool {
        self.echo_enabled.load(Ordering::Relaxed)
    }

    /// Register processors for this logger's current channel
    ///
    /// Returns the channel the processors were registered against.
    pub fn add_processors<I>(&self, processors: I) -> Result<String>
    where
        I: IntoIterator<Item = Processor>,
    {
        let channel = self.channel();
        self.processors.register(&channel, processors)
    }

    pub fn processors(&self) -> &ProcessorRegistry {
        &self.processors
    }

    /// Log `message` at `level`
    ///
    /// An entry below the minimum level returns `Ok(())` without side
    /// effects. Every handler is attempted; the first failure is returned
    /// together with the entry that could not be written.
    pub fn log(&self, level: LogLevel, message: impl fmt::Display, context: LogContext) -> Result<()> {
        if !should_log(level, self.min_level()) {
            return Ok(());
        }

        let channel = self.channel();
        let mut entry = LogEntry::new(level, message.to_string(), channel.as_str(), context);
        self.processors.apply(&channel, &mut entry);

        let mut first_error = None;
        let mut rendered = None;
        // Held across every handler's write; the file lock is per write
        for handler in self.handlers.lock().iter_mut() {
            match handler.handle(&entry) {
                Ok(line) => {
                    if rendered.is_none() {
                        rendered = line;
                    }
                }
                Err(e) => {
                    first_error
                        .get_or_insert_with(|| LoggerError::delivery(handler.name(), &entry, e));
                }
            }
        }

        if self.output() {
            // Echo repeats the first handler's line; the echo formatter only
            // renders when no handler produced text
            let mut echo = self.echo.lock();
            let echoed = match rendered {
                Some(line) => echo.write_line(&line),
                None => echo.handle(&entry).map(|_| ()),
            };
            if let Err(e) = echoed {
                first_error.get_or_insert_with(|| LoggerError::delivery(echo.name(), &entry, e));
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Fine-grained events useful while debugging
    #[inline]
    pub fn debug(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.log(LogLevel::Debug, message, context)
    }

    /// Interesting events that show the application's progress
    #[inline]
    pub fn info(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.log(LogLevel::Info, message, context)
    }

    /// Normal but significant events
    #[inline]
    pub fn notice(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.log(LogLevel::Notice, message, context)
    }

    /// Undesirable situations that are not necessarily wrong
    #[inline]
    pub fn warning(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.log(LogLevel::Warning, message, context)
    }

    /// Runtime errors that do not need immediate action
    #[inline]
    pub fn error(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.log(LogLevel::Error, message, context)
    }

    /// Critical conditions, e.g. an unavailable component
    #[inline]
    pub fn critical(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.log(LogLevel::Critical, message, context)
    }

    /// Action must be taken immediately
    #[inline]
    pub fn alert(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.log(LogLevel::Alert, message, context)
    }

    /// The system is unusable
    #[inline]
    pub fn emergency(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.log(LogLevel::Emergency, message, context)
    }

    /// Close every handler; later entries are dropped by the closed handlers
    pub fn close(&self) -> Result<()> {
        let mut first_error = None;
        for handler in self.handlers.lock().iter_mut() {
            if let Err(e) = handler.close() {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Parse a level name, handing failures to the reporter before returning them
pub(crate) fn parse_level(reporter: &dyn ErrorReporter, name: &str) -> Result<LevelFilter> {
    name.parse::<LevelFilter>().inspect_err(|e| {
        reporter.report(CONFIG_ERROR_STATUS, &e.to_string(), file!(), line!());
    })
}

/// Resolve the dated log file path for `log_file`
pub(crate) fn resolve_log_file(
    resolver: &dyn PathResolver,
    log_file: &str,
) -> Result<std::path::PathBuf> {
    let fragment = format!(
        "{}/{}-{}.txt",
        LOG_DIR,
        Local::now().format("%Y-%m-%d.%H-%M-%S"),
        log_file
    );
    resolver.resolve(&fragment, ResolveMode::Create)
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use channel_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .channel("api")
///     .min_level(LogLevel::Info)
///     .handler(EchoHandler::new())
///     .processor(processors::pid())
///     .build()
///     .unwrap();
///
/// assert_eq!(logger.channel(), "api");
/// ```
pub struct LoggerBuilder {
    channel: String,
    min_level: LevelFilter,
    handlers: Vec<Box<dyn Handler>>,
    output: bool,
    echo_writer: Option<EchoWriter>,
    echo_formatter: Option<Box<dyn Formatter>>,
    registry: ProcessorRegistry,
    processors: Vec<Processor>,
    reporter: Arc<dyn ErrorReporter>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            channel: "app".to_string(),
            min_level: LevelFilter::default(),
            handlers: Vec::new(),
            output: false,
            echo_writer: None,
            echo_formatter: None,
            registry: ProcessorRegistry::new(),
            processors: Vec::new(),
            reporter: Arc::new(StderrReporter),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: impl Into<LevelFilter>) -> Self {
        self.min_level = level.into();
        self
    }

    /// Add a handler
    #[must_use = "builder methods return a new value"]
    pub fn handler<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Echo written lines to stdout
    #[must_use = "builder methods return a new value"]
    pub fn output(mut self, enabled: bool) -> Self {
        self.output = enabled;
        self
    }

    /// Send echoed lines to `writer` instead of stdout
    #[must_use = "builder methods return a new value"]
    pub fn echo_writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.echo_writer = Some(Box::new(writer));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn echo_formatter<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.echo_formatter = Some(Box::new(formatter));
        self
    }

    /// Use a registry shared with other loggers
    #[must_use = "builder methods return a new value"]
    pub fn processor_registry(mut self, registry: ProcessorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Register a processor for the logger's channel at build time
    #[must_use = "builder methods return a new value"]
    pub fn processor(mut self, processor: Processor) -> Self {
        self.processors.push(processor);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Build the Logger
    ///
    /// Fails if processors were given for an empty channel name.
    pub fn build(self) -> Result<Logger> {
        if !self.processors.is_empty() {
            self.registry.register(&self.channel, self.processors)?;
        }

        let writer = self.echo_writer.unwrap_or_else(stdout_writer);
        let mut echo = EchoHandler::with_writer(writer);
        if let Some(formatter) = self.echo_formatter {
            echo = echo.with_formatter(formatter);
        }

        Ok(Logger {
            channel: RwLock::new(self.channel),
            min_level: RwLock::new(self.min_level),
            handlers: Mutex::new(self.handlers),
            echo_enabled: AtomicBool::new(self.output),
            echo: Mutex::new(echo),
            processors: self.registry,
            reporter: self.reporter,
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
