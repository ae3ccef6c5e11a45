//! Formatter implementations

pub mod json;
pub mod line;

pub use json::JsonFormatter;
pub use line::{LineFormatter, Timezone, TIMESTAMP_FORMAT};

// Re-export trait for convenience
pub use crate::core::Formatter;

/// Serialize to JSON, substituting `fallback` if serialization fails
pub(crate) fn encode_or<T, F>(value: &T, fallback: F) -> String
where
    T: serde::Serialize + ?Sized,
    F: FnOnce() -> String,
{
    serde_json::to_string(value).unwrap_or_else(|_| fallback())
}

/// Replace every line break with three spaces
pub(crate) fn single_line(text: &str) -> String {
    text.replace("\r\n", "   ")
        .replace(['\n', '\r'], "   ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::{Error as _, Serializer};

    struct Unserializable;

    impl serde::Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("cannot serialize"))
        }
    }

    #[test]
    fn test_encode_falls_back_instead_of_failing() {
        assert_eq!(encode_or(&Unserializable, || "{}".to_string()), "{}");
        assert_eq!(encode_or(&serde_json::json!({"a": 1}), || "{}".to_string()), r#"{"a":1}"#);
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("a\nb\r\nc\rd"), "a   b   c   d");
        assert_eq!(single_line("plain"), "plain");
    }
}
