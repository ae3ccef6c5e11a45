//! Log level definitions
//!
//! `LogLevel` is the severity of an emitted entry. `LevelFilter` is the
//! configured minimum and additionally carries the `None` sentinel, which
//! suppresses all logging and can never be the level of an entry.

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Notice = 2,
    Warning = 3,
    Error = 4,
    Critical = 5,
    Alert = 6,
    Emergency = 7,
}

impl LogLevel {
    pub const ALL: [LogLevel; 8] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Notice,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
        LogLevel::Alert,
        LogLevel::Emergency,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Notice => "NOTICE",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
            LogLevel::Alert => "ALERT",
            LogLevel::Emergency => "EMERGENCY",
        }
    }

    /// Numeric rank used for filtering
    pub fn rank(&self) -> i8 {
        *self as i8
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<LevelFilter>()? {
            LevelFilter::Level(level) => Ok(level),
            LevelFilter::None => Err(LoggerError::config(
                "LogLevel",
                "'none' is only valid as a minimum level",
            )),
        }
    }
}

/// Configured minimum severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelFilter {
    /// Suppresses every entry
    None,
    Level(LogLevel),
}

impl Default for LevelFilter {
    fn default() -> Self {
        LevelFilter::Level(LogLevel::Debug)
    }
}

impl LevelFilter {
    pub const NAMES: [&'static str; 9] = [
        "none",
        "debug",
        "info",
        "notice",
        "warning",
        "error",
        "critical",
        "alert",
        "emergency",
    ];

    pub fn rank(&self) -> i8 {
        match self {
            LevelFilter::None => -1,
            LevelFilter::Level(level) => level.rank(),
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            LevelFilter::None => "NONE",
            LevelFilter::Level(level) => level.to_str(),
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        LevelFilter::Level(level)
    }
}

impl fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for LevelFilter {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.trim().to_lowercase().as_str() {
            "none" => return Ok(LevelFilter::None),
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "notice" => LogLevel::Notice,
            "warning" | "warn" => LogLevel::Warning,
            "error" => LogLevel::Error,
            "critical" => LogLevel::Critical,
            "alert" => LogLevel::Alert,
            "emergency" => LogLevel::Emergency,
            _ => {
                return Err(LoggerError::config(
                    "LogLevel",
                    format!(
                        "Log level {} is not a valid log level. Must be one of ({})",
                        s,
                        Self::NAMES.join(", ")
                    ),
                ))
            }
        };
        Ok(LevelFilter::Level(level))
    }
}

/// Returns true if an entry at `candidate` passes the `minimum` gate
///
/// `None` rejects every level even though its rank is below all of them.
#[inline]
pub fn should_log(candidate: LogLevel, minimum: LevelFilter) -> bool {
    match minimum {
        LevelFilter::None => false,
        LevelFilter::Level(minimum) => candidate.rank() >= minimum.rank(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ranks() {
        assert_eq!(LevelFilter::None.rank(), -1);
        assert_eq!(LogLevel::Debug.rank(), 0);
        assert_eq!(LogLevel::Emergency.rank(), 7);
        assert!(LogLevel::Warning > LogLevel::Notice);
    }

    #[test]
    fn test_should_log() {
        let min = LevelFilter::Level(LogLevel::Warning);
        assert!(!should_log(LogLevel::Notice, min));
        assert!(should_log(LogLevel::Warning, min));
        assert!(should_log(LogLevel::Emergency, min));

        for level in LogLevel::ALL {
            assert!(!should_log(level, LevelFilter::None));
            assert!(should_log(level, LevelFilter::default()));
        }
    }

    #[test]
    fn test_parse_levels() {
        assert_eq!("none".parse::<LevelFilter>().unwrap(), LevelFilter::None);
        assert_eq!(
            "WARN".parse::<LevelFilter>().unwrap(),
            LevelFilter::Level(LogLevel::Warning)
        );
        assert_eq!("critical".parse::<LogLevel>().unwrap(), LogLevel::Critical);
        assert!("none".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_parse_bogus_is_configuration_error() {
        let err = "bogus".parse::<LevelFilter>().unwrap_err();
        assert!(matches!(err, LoggerError::Configuration { .. }));
        assert!(err.to_string().contains("bogus"));
        assert!(err.to_string().contains("emergency"));
    }
}
