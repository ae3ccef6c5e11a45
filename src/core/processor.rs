//! Processor chain for enriching entry context before formatting
//!
//! A processor is a plain `LogContext -> LogContext` function. Processors are
//! registered per scope (usually a channel name) in a [`ProcessorRegistry`]
//! and applied in registration order, each one seeing the output of the
//! previous one.

use super::error::{LoggerError, Result};
use super::log_context::LogContext;
use super::log_entry::LogEntry;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

pub type Processor = Arc<dyn Fn(LogContext) -> LogContext + Send + Sync>;

/// Wrap a closure as a [`Processor`]
pub fn processor<F>(f: F) -> Processor
where
    F: Fn(LogContext) -> LogContext + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Ordered list of processors
#[derive(Clone, Default)]
pub struct ProcessorChain {
    processors: Vec<Processor>,
}

impl ProcessorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, processor: Processor) {
        self.processors.push(processor);
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Run every processor over the entry's context and store the result
    ///
    /// This is the only place an entry's context changes after construction.
    pub fn apply(&self, entry: &mut LogEntry) {
        if self.processors.is_empty() {
            return;
        }
        let context = self
            .processors
            .iter()
            .fold(entry.take_context(), |ctx, p| p(ctx));
        entry.set_context(context);
    }
}

impl std::fmt::Debug for ProcessorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessorChain")
            .field("len", &self.processors.len())
            .finish()
    }
}

/// Processors keyed by scope
///
/// Cloning shares the underlying registry, so several loggers can be given
/// the same one.
#[derive(Clone, Default)]
pub struct ProcessorRegistry {
    scopes: Arc<RwLock<HashMap<String, ProcessorChain>>>,
}

impl ProcessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append processors to `scope`, returning the scope identifier
    pub fn register<I>(&self, scope: &str, processors: I) -> Result<String>
    where
        I: IntoIterator<Item = Processor>,
    {
        let scope = Self::validate_scope(scope)?;
        let mut scopes = self.scopes.write();
        let chain = scopes.entry(scope.clone()).or_default();
        for p in processors {
            chain.push(p);
        }
        Ok(scope)
    }

    /// Append built-in processors by name
    ///
    /// Every name is resolved before anything is registered, so an unknown
    /// name leaves the scope untouched.
    pub fn register_named<S: AsRef<str>>(&self, scope: &str, names: &[S]) -> Result<String> {
        let scope = Self::validate_scope(scope)?;
        let resolved = names
            .iter()
            .map(|name| {
                crate::processors::by_name(name.as_ref()).ok_or_else(|| {
                    LoggerError::invalid_processor(
                        scope.clone(),
                        format!(
                            "'{}' is not a known processor. Must be one of ({})",
                            name.as_ref(),
                            crate::processors::NAMES.join(", ")
                        ),
                    )
                })
            })
            .collect::<Result<Vec<_>>>()?;
        self.register(&scope, resolved)
    }

    /// Snapshot of the chain registered for `scope`
    pub fn chain(&self, scope: &str) -> ProcessorChain {
        self.scopes.read().get(scope).cloned().unwrap_or_default()
    }

    /// Apply the chain for `scope` to an entry
    pub fn apply(&self, scope: &str, entry: &mut LogEntry) {
        let chain = self.chain(scope);
        chain.apply(entry);
    }

    /// Scopes are keyed exactly as given, so they match the channel a
    /// logger looks them up with
    fn validate_scope(scope: &str) -> Result<String> {
        if scope.trim().is_empty() {
            return Err(LoggerError::invalid_processor(
                scope,
                "processors must be registered against a non-empty scope",
            ));
        }
        Ok(scope.to_string())
    }
}

impl std::fmt::Debug for ProcessorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scopes = self.scopes.read();
        f.debug_map()
            .entries(scopes.iter().map(|(k, v)| (k, v.len())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldValue, LogLevel};

    fn entry(context: LogContext) -> LogEntry {
        LogEntry::new(LogLevel::Info, "msg", "app", context)
    }

    #[test]
    fn test_chain_applies_in_order() {
        let mut chain = ProcessorChain::new();
        chain.push(processor(|ctx| ctx.with_field("a", 1)));
        chain.push(processor(|ctx| {
            let saw_a = ctx.contains_key("a");
            ctx.with_field("b", saw_a)
        }));

        let mut e = entry(LogContext::new().with_field("x", "orig"));
        chain.apply(&mut e);

        let keys: Vec<&str> = e.context().keys().collect();
        assert_eq!(keys, vec!["x", "a", "b"]);
        assert_eq!(e.context().get("b"), Some(&FieldValue::Bool(true)));
    }

    #[test]
    fn test_registry_scopes_are_independent() {
        let registry = ProcessorRegistry::new();
        let scope = registry
            .register("billing", vec![processor(|ctx| ctx.with_field("team", "billing"))])
            .unwrap();
        assert_eq!(scope, "billing");

        let mut other = entry(LogContext::new());
        registry.apply("app", &mut other);
        assert!(other.context().is_empty());

        let mut billing = entry(LogContext::new());
        registry.apply("billing", &mut billing);
        assert!(billing.context().contains_key("team"));
    }

    #[test]
    fn test_registry_is_shared_between_clones() {
        let registry = ProcessorRegistry::new();
        let shared = registry.clone();
        shared
            .register("app", vec![processor(|ctx| ctx.with_field("k", 1))])
            .unwrap();

        assert_eq!(registry.chain("app").len(), 1);
    }

    #[test]
    fn test_scope_key_is_exact() {
        let registry = ProcessorRegistry::new();
        let scope = registry
            .register(" app ", vec![processor(|ctx| ctx.with_field("k", 1))])
            .unwrap();
        assert_eq!(scope, " app ");

        let mut padded = entry(LogContext::new());
        registry.apply(" app ", &mut padded);
        assert!(padded.context().contains_key("k"));

        assert!(registry.chain("app").is_empty());
    }

    #[test]
    fn test_register_rejects_empty_scope() {
        let registry = ProcessorRegistry::new();
        let err = registry.register("  ", Vec::new()).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidProcessor { .. }));
    }

    #[test]
    fn test_register_named_unknown_registers_nothing() {
        let registry = ProcessorRegistry::new();
        let err = registry
            .register_named("app", &["pid", "no_such_processor"])
            .unwrap_err();

        assert!(matches!(err, LoggerError::InvalidProcessor { .. }));
        assert!(err.to_string().contains("no_such_processor"));
        assert!(registry.chain("app").is_empty());

        registry.register_named("app", &["pid", "thread"]).unwrap();
        assert_eq!(registry.chain("app").len(), 2);
    }
}
