//! Basic logger usage example
//!
//! Demonstrates a root logger with a console appender and level gating.
//!
//! Run with: cargo run --example basic_usage

use appender_log::prelude::*;
use appender_log::{debug, info, warn};
use std::sync::Arc;

fn main() -> Result<()> {
    appender_log::core::identity::mark_process_start();
    println!("=== Appender Log - Basic Usage Example ===\n");

    let logger = Logger::root();
    logger.add_appender(Arc::new(StdoutAppender::new().with_colors(true)));

    println!("1. Logging at different levels:");
    logger.debug(&LogEvent::new("This is a debug message"));
    logger.info(&LogEvent::new("This is an info message"));
    logger.warn(&LogEvent::new("This is a warning message"));
    logger.error(&LogEvent::new("This is an error message"));
    logger.fatal(&LogEvent::new("This is a fatal message"));

    println!("\n2. Raising the logger threshold to INFO:");
    logger.set_level(LogLevel::Info);
    debug!(logger, "Debug message (hidden)");
    info!(logger, "Info message (visible)");
    warn!(logger, "Warning message (visible)");

    println!("\n3. Custom pattern:");
    let formatter = Arc::new(LogFormatter::new("%d{%H:%M:%S} [%p] (%f:%l) %m")?);
    for appender in logger.appenders() {
        appender.set_formatter(Arc::clone(&formatter));
    }
    info!(logger, "Rendered with {}", formatter.pattern());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
