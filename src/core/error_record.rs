//! Structured error detail attached to a log entry
//!
//! A value placed in the context under [`EXCEPTION_KEY`] is lifted out of the
//! context and rendered in its own field when it implements
//! [`ReportableError`].

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;

/// Reserved context key holding an error value
pub const EXCEPTION_KEY: &str = "exception";

/// Capability of a value that can be reported as a structured error
pub trait ReportableError: fmt::Debug + Send + Sync {
    fn message(&self) -> String;

    fn code(&self) -> i64 {
        0
    }

    fn file(&self) -> String {
        String::new()
    }

    fn line(&self) -> u32 {
        0
    }

    fn trace(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Snapshot of an error as it is rendered in a log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub message: String,
    pub code: i64,
    pub file: String,
    pub line: u32,
    pub trace: Vec<String>,
}

impl ErrorRecord {
    pub fn from_reportable(error: &dyn ReportableError) -> Self {
        Self {
            message: error.message(),
            code: error.code(),
            file: error.file(),
            line: error.line(),
            trace: error.trace(),
        }
    }
}

/// Adapter giving any `std::error::Error` the [`ReportableError`] capability
///
/// The source location is the place where the report was created and the
/// trace is the chain of `source()` messages.
///
/// ```
/// use channel_logger::core::ErrorReport;
/// use channel_logger::core::ReportableError;
///
/// let io = std::io::Error::new(std::io::ErrorKind::NotFound, "config missing");
/// let report = ErrorReport::new(&io).with_code(404);
/// assert_eq!(report.message(), "config missing");
/// assert_eq!(report.code(), 404);
/// assert!(report.file().ends_with(".rs"));
/// ```
#[derive(Debug, Clone)]
pub struct ErrorReport {
    message: String,
    code: i64,
    file: &'static str,
    line: u32,
    trace: Vec<String>,
}

impl ErrorReport {
    #[track_caller]
    pub fn new(error: &(dyn StdError + 'static)) -> Self {
        let location = Location::caller();
        let mut trace = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            trace.push(cause.to_string());
            source = cause.source();
        }

        Self {
            message: error.to_string(),
            code: 0,
            file: location.file(),
            line: location.line(),
            trace,
        }
    }

    #[track_caller]
    pub fn msg(message: impl Into<String>) -> Self {
        let location = Location::caller();
        Self {
            message: message.into(),
            code: 0,
            file: location.file(),
            line: location.line(),
            trace: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: i64) -> Self {
        self.code = code;
        self
    }
}

impl ReportableError for ErrorReport {
    fn message(&self) -> String {
        self.message.clone()
    }

    fn code(&self) -> i64 {
        self.code
    }

    fn file(&self) -> String {
        self.file.to_string()
    }

    fn line(&self) -> u32 {
        self.line
    }

    fn trace(&self) -> Vec<String> {
        self.trace.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "loading settings failed")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_report_captures_chain_and_location() {
        let err = Outer(std::io::Error::new(std::io::ErrorKind::NotFound, "settings.json"));
        let line = line!() + 1;
        let report = ErrorReport::new(&err).with_code(2);

        let record = ErrorRecord::from_reportable(&report);
        assert_eq!(record.message, "loading settings failed");
        assert_eq!(record.code, 2);
        assert_eq!(record.line, line);
        assert!(record.file.ends_with("error_record.rs"));
        assert_eq!(record.trace, vec!["settings.json".to_string()]);
    }

    #[test]
    fn test_default_capability_methods() {
        #[derive(Debug)]
        struct Bare;

        impl ReportableError for Bare {
            fn message(&self) -> String {
                "bare".to_string()
            }
        }

        let record = ErrorRecord::from_reportable(&Bare);
        assert_eq!(record.code, 0);
        assert_eq!(record.file, "");
        assert!(record.trace.is_empty());
    }
}
