//! File logging example
//!
//! Demonstrates logging to both console and file appenders simultaneously,
//! with a stricter threshold on the console.
//!
//! Run with: cargo run --example file_logging

use appender_log::prelude::*;
use appender_log::{debug, error, info, warn};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Appender Log - File Logging Example ===\n");

    let file = Arc::new(FileAppender::open("application.log")?);
    let logger = Logger::builder()
        .name("app")
        .appender(Arc::new(StdoutAppender::new().with_level(LogLevel::Warn)))
        .appender(file.clone())
        .build();

    println!("1. Everything goes to the file, WARN and above to the console:");
    info!(logger, "Application started");
    debug!(logger, "Loading configuration...");
    warn!(logger, "Using default settings for some options");
    error!(logger, "Failed to load optional plugin");

    println!("\n2. Reopening the file (e.g. after external rotation):");
    file.reopen()?;
    for i in 1..=5 {
        info!(logger, "Processing item {}/5", i);
    }

    logger.flush()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check '{}' for the full log output", file.path().display());

    Ok(())
}
