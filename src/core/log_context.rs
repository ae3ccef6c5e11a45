//! Structured logging context for key-value fields
//!
//! This module provides:
//! - `LogContext`: Per-entry structured fields, kept in insertion order
//! - `LoggerContext`: Persistent fields merged in by a processor
//! - `ContextGuard`: RAII guard for scoped persistent fields

use super::error_record::{ErrorRecord, ReportableError, EXCEPTION_KEY};
use parking_lot::RwLock;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Value type for structured logging fields
#[derive(Debug, Clone)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    /// Arbitrary nested JSON
    Json(serde_json::Value),
    /// An error value; lifted into the entry's error record when stored
    /// under the reserved `exception` key
    Error(Arc<dyn ReportableError>),
}

impl FieldValue {
    pub fn error<E: ReportableError + 'static>(error: E) -> Self {
        FieldValue::Error(Arc::new(error))
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::String(s) => serializer.serialize_str(s),
            FieldValue::Int(i) => serializer.serialize_i64(*i),
            FieldValue::Float(f) => serializer.serialize_f64(*f),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Null => serializer.serialize_unit(),
            FieldValue::Json(v) => v.serialize(serializer),
            FieldValue::Error(e) => ErrorRecord::from_reportable(e.as_ref()).serialize(serializer),
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::String(a), FieldValue::String(b)) => a == b,
            (FieldValue::Int(a), FieldValue::Int(b)) => a == b,
            (FieldValue::Float(a), FieldValue::Float(b)) => a == b,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::Null, FieldValue::Null) => true,
            (FieldValue::Json(a), FieldValue::Json(b)) => a == b,
            (FieldValue::Error(a), FieldValue::Error(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u64> for FieldValue {
    fn from(i: u64) -> Self {
        match i64::try_from(i) {
            Ok(v) => FieldValue::Int(v),
            Err(_) => FieldValue::Json(i.into()),
        }
    }
}

impl From<usize> for FieldValue {
    fn from(i: usize) -> Self {
        FieldValue::from(i as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        FieldValue::Json(v)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Context for structured logging with key-value fields
///
/// Keys keep the order they were first inserted in; inserting an existing
/// key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogContext {
    fields: Vec<(String, FieldValue)>,
}

impl LogContext {
    /// Create a new empty log context
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field to the context
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.add_field(key, value);
        self
    }

    /// Attach an error under the reserved `exception` key
    pub fn with_error<E: ReportableError + 'static>(self, error: E) -> Self {
        self.with_field(EXCEPTION_KEY, FieldValue::error(error))
    }

    /// Add a field to the context (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove a field, keeping the order of the remaining ones
    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        let idx = self.fields.iter().position(|(k, _)| k == key)?;
        Some(self.fields.remove(idx).1)
    }

    /// Lift an error stored under `exception` out of the context
    ///
    /// Only values with the error capability are taken; anything else under
    /// that key stays where it is.
    pub fn take_error(&mut self) -> Option<ErrorRecord> {
        match self.get(EXCEPTION_KEY) {
            Some(FieldValue::Error(_)) => match self.remove(EXCEPTION_KEY) {
                Some(FieldValue::Error(e)) => Some(ErrorRecord::from_reportable(e.as_ref())),
                _ => None,
            },
            _ => None,
        }
    }

    /// Iterate fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if context has any fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for LogContext {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<K, V> FromIterator<(K, V)> for LogContext
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ctx = LogContext::new();
        for (k, v) in iter {
            ctx.add_field(k, v);
        }
        ctx
    }
}

/// Logger-level persistent context for structured logging
///
/// `LoggerContext` stores fields that persist across all log entries, such
/// as service name or version. It is merged into entries by the
/// [`static_fields`](crate::processors::static_fields) processor.
///
/// Thread-safe: Can be safely shared across threads.
///
/// # Example
///
/// ```
/// use channel_logger::core::LoggerContext;
///
/// let ctx = LoggerContext::new();
/// ctx.set("service", "api-gateway");
/// ctx.set("version", "1.2.3");
///
/// assert_eq!(ctx.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoggerContext {
    fields: Arc<RwLock<BTreeMap<String, FieldValue>>>,
}

impl LoggerContext {
    /// Create a new empty logger context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field in the context
    ///
    /// If the field already exists, it will be overwritten.
    pub fn set<K, V>(&self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.write().insert(key.into(), value.into());
    }

    /// Set a field for as long as the returned guard lives
    #[must_use = "the field is removed when the guard is dropped"]
    pub fn scoped<K, V>(&self, key: K, value: V) -> ContextGuard
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let key = key.into();
        self.set(key.clone(), value);
        ContextGuard {
            context: Arc::clone(&self.fields),
            key,
        }
    }

    /// Remove a field from the context
    pub fn remove(&self, key: &str) {
        self.fields.write().remove(key);
    }

    /// Clear all fields from the context
    pub fn clear(&self) {
        self.fields.write().clear();
    }

    /// Check if the context is empty
    pub fn is_empty(&self) -> bool {
        self.fields.read().is_empty()
    }

    /// Get the number of fields in the context
    pub fn len(&self) -> usize {
        self.fields.read().len()
    }

    /// Merge context fields into a LogContext
    ///
    /// Entry-level fields take priority over logger-level fields.
    pub fn merge_into(&self, log_context: &mut LogContext) {
        let fields = self.fields.read();
        for (key, value) in fields.iter() {
            if !log_context.contains_key(key) {
                log_context.add_field(key.clone(), value.clone());
            }
        }
    }
}

/// RAII guard for scoped context fields
///
/// When dropped, automatically removes the field from the logger context.
pub struct ContextGuard {
    context: Arc<RwLock<BTreeMap<String, FieldValue>>>,
    key: String,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        self.context.write().remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error_record::ErrorReport;

    #[test]
    fn test_log_context_creation() {
        let ctx = LogContext::new();
        assert!(ctx.is_empty());
        assert_eq!(serde_json::to_string(&ctx).unwrap(), "{}");
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let ctx = LogContext::new()
            .with_field("zeta", 1)
            .with_field("alpha", "two")
            .with_field("mid", true);

        let keys: Vec<&str> = ctx.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(
            serde_json::to_string(&ctx).unwrap(),
            r#"{"zeta":1,"alpha":"two","mid":true}"#
        );
    }

    #[test]
    fn test_replace_keeps_position() {
        let ctx = LogContext::new()
            .with_field("a", 1)
            .with_field("b", 2)
            .with_field("a", 3);

        assert_eq!(ctx.len(), 2);
        assert_eq!(serde_json::to_string(&ctx).unwrap(), r#"{"a":3,"b":2}"#);
    }

    #[test]
    fn test_take_error_only_lifts_reportable_values() {
        let mut ctx = LogContext::new()
            .with_error(ErrorReport::msg("db down").with_code(7))
            .with_field("x", 1);

        let record = ctx.take_error().expect("error present");
        assert_eq!(record.message, "db down");
        assert_eq!(record.code, 7);
        assert!(!ctx.contains_key(EXCEPTION_KEY));
        assert_eq!(serde_json::to_string(&ctx).unwrap(), r#"{"x":1}"#);

        let mut ctx = LogContext::new().with_field(EXCEPTION_KEY, "just a string");
        assert!(ctx.take_error().is_none());
        assert!(ctx.contains_key(EXCEPTION_KEY));
    }

    #[test]
    fn test_nested_json_and_slashes() {
        let ctx = LogContext::new()
            .with_field("path", "/var/log/app")
            .with_field("tags", serde_json::json!(["a", "b"]));

        assert_eq!(
            serde_json::to_string(&ctx).unwrap(),
            r#"{"path":"/var/log/app","tags":["a","b"]}"#
        );
    }

    #[test]
    fn test_logger_context_merge_priority() {
        let logger_ctx = LoggerContext::new();
        logger_ctx.set("key", "logger_value");
        logger_ctx.set("service", "api");

        let mut log_ctx = LogContext::new().with_field("key", "entry_value");
        logger_ctx.merge_into(&mut log_ctx);

        assert_eq!(log_ctx.len(), 2);
        assert_eq!(log_ctx.get("key"), Some(&FieldValue::from("entry_value")));
        assert_eq!(log_ctx.get("service"), Some(&FieldValue::from("api")));
    }

    #[test]
    fn test_context_guard_removes_field() {
        let ctx = LoggerContext::new();
        {
            let _guard = ctx.scoped("request_id", "abc-123");
            assert_eq!(ctx.len(), 1);
        }
        assert!(ctx.is_empty());
    }
}
