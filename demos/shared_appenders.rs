//! Shared appenders example
//!
//! Builds a registry with a root logger and two named loggers that share one
//! file appender and one formatter.
//!
//! Run with: cargo run --example shared_appenders

use appender_log::prelude::*;
use appender_log::{enter_task, info, install_global, warn};
use std::sync::Arc;
use std::thread;

fn main() -> Result<()> {
    let formatter = Arc::new(LogFormatter::new("%d [%p] t%t/f%F %m")?);
    let shared_file: Arc<dyn Appender> =
        Arc::new(FileAppender::open("shared.log")?.with_formatter(Arc::clone(&formatter)));
    let console: Arc<dyn Appender> =
        Arc::new(StdoutAppender::new().with_formatter(Arc::clone(&formatter)));

    let root = Logger::builder().appender(console.clone()).build();
    let registry = install_global(LoggerRegistry::new(root))?;
    registry.register(
        Logger::builder()
            .name("http")
            .level(LogLevel::Info)
            .appender(console.clone())
            .appender(shared_file.clone())
            .build(),
    )?;
    registry.register(
        Logger::builder()
            .name("db")
            .level(LogLevel::Warn)
            .appender(shared_file.clone())
            .build(),
    )?;

    let workers: Vec<_> = (1..=3u64)
        .map(|task| {
            thread::spawn(move || {
                let _task = enter_task(task);
                let Some(registry) = appender_log::global() else {
                    return;
                };
                let http = registry.logger("http");
                let db = registry.logger("db");
                info!(http, "request {} accepted", task);
                warn!(db, "request {} waited on a lock", task);
            })
        })
        .collect();

    for worker in workers {
        let _ = worker.join();
    }

    formatter.set_pattern("[%p] %m")?;
    info!(registry.root(), "pattern switched for every holder");

    shared_file.flush()?;
    Ok(())
}
