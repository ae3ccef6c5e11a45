//! Basic logger usage example
//!
//! Demonstrates echoing lines to stdout, level filtering, context fields,
//! error records and processors.
//!
//! Run with: cargo run --example basic_usage

use channel_logger::prelude::*;
use channel_logger::{info, warning};

fn main() -> Result<()> {
    println!("=== Channel Logger - Basic Usage Example ===\n");

    // No file handler; every accepted entry is echoed to stdout
    let logger = Logger::builder()
        .channel("demo")
        .min_level(LogLevel::Debug)
        .output(true)
        .build()?;

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message", LogContext::new())?;
    logger.info("This is an info message", LogContext::new())?;
    logger.notice("This is a notice message", LogContext::new())?;
    logger.warning("This is a warning message", LogContext::new())?;
    logger.error("This is an error message", LogContext::new())?;
    logger.critical("This is a critical message", LogContext::new())?;
    logger.alert("This is an alert message", LogContext::new())?;
    logger.emergency("This is an emergency message", LogContext::new())?;

    println!("\n2. Raising the minimum level:");
    logger.set_log_level("warning")?;
    logger.info("Hidden", LogContext::new())?;
    logger.warning("Shown", LogContext::new())?;

    if let Err(e) = logger.set_log_level("loud") {
        println!("   rejected: {}", e);
    }

    println!("\n3. Context fields and macros:");
    logger.set_log_level("debug")?;
    logger.info("user created", log_context! { "id" => 42, "name" => "ada" })?;
    info!(logger, "Server listening on port {}", 8080)?;
    warning!(logger, { "attempt" => 3 }, "Retrying {}", "upload")?;

    println!("\n4. Error records:");
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml missing");
    logger.error(
        "startup failed",
        LogContext::new()
            .with_error(ErrorReport::new(&io).with_code(2))
            .with_field("path", "/etc/app"),
    )?;

    println!("\n5. Processors:");
    logger.add_processors([processors::pid(), processors::thread()])?;
    logger.info("enriched entry", LogContext::new())?;

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
