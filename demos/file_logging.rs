//! File logging example
//!
//! Demonstrates the built-in dated file logger, a custom stream handler and
//! configuration loaded from JSON.
//!
//! Run with: cargo run --example file_logging

use channel_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Channel Logger - File Logging Example ===\n");

    let root = std::env::temp_dir().join("channel_logger_demo");
    let storage = StorageRoot::new(&root);

    println!("1. Built-in file logger under {}:", root.display());
    let logger = Logger::file("app", "application", "info", &storage)?;
    logger.set_output(true);

    logger.info("Application started", LogContext::new())?;
    logger.debug("Not written, below the minimum", LogContext::new())?;
    logger.warning("Using default settings", log_context! { "option" => "timeout" })?;

    for i in 1..=5 {
        logger.info(format!("Processing item {}/5", i), log_context! { "item" => i })?;
    }

    println!("\n2. JSON lines through a stream handler:");
    let path = root.join("events.jsonl");
    let handler = StreamHandler::new(&path, Some(Box::new(JsonFormatter::new())))?;
    let json_logger = Logger::builder().channel("events").handler(handler).build()?;
    json_logger.notice("order placed", log_context! { "order" => 1017, "total" => 99.5 })?;
    println!("   wrote {}", path.display());

    println!("\n3. Logger from configuration:");
    let config = LoggerConfig::from_json_str(&format!(
        r#"{{"channel": "jobs", "level": "notice", "log_file": "jobs",
            "storage_root": {:?}, "timezone": "utc", "processors": ["pid"]}}"#,
        root.to_string_lossy()
    ))?;
    let jobs = Logger::from_config(&config)?;
    jobs.notice("nightly export finished", log_context! { "rows" => 12000 })?;

    logger.close()?;
    json_logger.close()?;
    jobs.close()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check '{}' for the log files", root.join("Storage/log").display());
    Ok(())
}
