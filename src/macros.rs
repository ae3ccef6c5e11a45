//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. Context fields go
//! in an optional brace block before the message. Every macro evaluates to
//! the `Result` returned by the logger.
//!
//! # Examples
//!
//! ```
//! use channel_logger::prelude::*;
//! use channel_logger::{info, warning};
//!
//! let logger = Logger::new("app");
//!
//! // Basic logging
//! info!(logger, "Server started")?;
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port)?;
//!
//! // With context fields
//! warning!(logger, { "attempt" => 3, "max" => 5 }, "Retrying {}", "upload")?;
//! # Ok::<(), LoggerError>(())
//! ```

/// Build a [`LogContext`](crate::core::LogContext) from `key => value` pairs.
///
/// # Examples
///
/// ```
/// use channel_logger::log_context;
///
/// let ctx = log_context! { "id" => 42, "name" => "ada" };
/// assert_eq!(ctx.len(), 2);
/// assert!(log_context! {}.is_empty());
/// ```
#[macro_export]
macro_rules! log_context {
    () => {
        $crate::core::LogContext::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::core::LogContext::new()$(.with_field($key, $value))+
    };
}

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use channel_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use channel_logger::log;
/// log!(logger, LogLevel::Info, "Simple message")?;
/// log!(logger, LogLevel::Error, { "code" => 500 }, "Request failed: {}", "/users")?;
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, { $($key:expr => $value:expr),* $(,)? }, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+), $crate::log_context!($($key => $value),*))
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+), $crate::core::LogContext::new())
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use channel_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use channel_logger::info;
/// info!(logger, "Application started")?;
/// info!(logger, "Processing {} items", 100)?;
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a notice-level message.
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Notice, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use channel_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use channel_logger::error;
/// error!(logger, "Failed to connect to database")?;
/// error!(logger, { "code" => 500 }, "Error: {}", "Internal error")?;
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

/// Log an alert-level message.
#[macro_export]
macro_rules! alert {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Alert, $($arg)+)
    };
}

/// Log an emergency-level message.
#[macro_export]
macro_rules! emergency {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Emergency, $($arg)+)
    };
}
