//! Built-in processors

use crate::core::{processor, LoggerContext, Processor};
use std::cell::RefCell;

/// Names accepted by [`by_name`]
pub const NAMES: [&str; 2] = ["pid", "thread"];

// Thread-local cache so the label is computed once per thread
thread_local! {
    static THREAD_LABEL_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

fn thread_label() -> String {
    THREAD_LABEL_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| {
                let current = std::thread::current();
                match current.name() {
                    Some(name) => name.to_string(),
                    None => format!("{:?}", current.id()),
                }
            })
            .clone()
    })
}

/// Adds the process id under `pid`
pub fn pid() -> Processor {
    processor(|ctx| ctx.with_field("pid", std::process::id()))
}

/// Adds the current thread's name (or id) under `thread`
pub fn thread() -> Processor {
    processor(|ctx| ctx.with_field("thread", thread_label()))
}

/// Merges persistent fields; fields already on the entry win
pub fn static_fields(fields: LoggerContext) -> Processor {
    processor(move |mut ctx| {
        fields.merge_into(&mut ctx);
        ctx
    })
}

/// Resolve a built-in processor by name
pub fn by_name(name: &str) -> Option<Processor> {
    match name.trim() {
        "pid" => Some(pid()),
        "thread" => Some(thread()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldValue, LogContext};

    #[test]
    fn test_pid_processor() {
        let ctx = pid()(LogContext::new());
        assert_eq!(
            ctx.get("pid"),
            Some(&FieldValue::Int(std::process::id() as i64))
        );
    }

    #[test]
    fn test_thread_processor_uses_thread_name() {
        let label = std::thread::Builder::new()
            .name("worker-7".to_string())
            .spawn(|| thread()(LogContext::new()))
            .unwrap()
            .join()
            .unwrap();

        assert_eq!(label.get("thread"), Some(&FieldValue::from("worker-7")));
    }

    #[test]
    fn test_static_fields_do_not_override_entry() {
        let fields = LoggerContext::new();
        fields.set("service", "api");
        fields.set("id", 0);

        let ctx = static_fields(fields)(LogContext::new().with_field("id", 42));
        assert_eq!(ctx.get("id"), Some(&FieldValue::Int(42)));
        assert_eq!(ctx.get("service"), Some(&FieldValue::from("api")));
    }

    #[test]
    fn test_by_name() {
        assert!(by_name("pid").is_some());
        assert!(by_name("thread").is_some());
        assert!(by_name("memory").is_none());
    }
}
