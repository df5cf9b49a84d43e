//! Appender trait for log output destinations

use super::{
    error::Result, formatter::LogFormatter, log_event::LogEvent, log_level::LogLevel,
};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};

/// An output sink for rendered log lines.
///
/// Appenders are shared as `Arc<dyn Appender>`, possibly across several
/// loggers and threads, so every method takes `&self` and implementations
/// guard their output target internally.
///
/// Threshold and formatter handling live in [`AppenderState`]; an
/// implementation only supplies [`state`](Appender::state),
/// [`name`](Appender::name) and [`write_line`](Appender::write_line).
pub trait Appender: Send + Sync {
    /// Threshold and formatter shared by every appender kind.
    fn state(&self) -> &AppenderState;

    fn name(&self) -> &str;

    /// Write one rendered line (without its trailing separator).
    fn write_line(&self, level: LogLevel, line: &str) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Gate `event` by this appender's threshold, render it and write it.
    ///
    /// Below the threshold this is a silent no-op.
    fn log(&self, level: LogLevel, event: &LogEvent) -> Result<()> {
        let state = self.state();
        if !level.passes(state.level()) {
            return Ok(());
        }
        let line = state.render(level, event);
        self.write_line(level, &line)
    }

    fn level(&self) -> LogLevel {
        self.state().level()
    }

    fn set_level(&self, level: LogLevel) {
        self.state().set_level(level);
    }

    fn formatter(&self) -> Option<Arc<LogFormatter>> {
        self.state().formatter()
    }

    fn set_formatter(&self, formatter: Arc<LogFormatter>) {
        self.state().set_formatter(formatter);
    }

    /// Drop the assigned formatter and fall back to the default layout.
    fn clear_formatter(&self) {
        self.state().clear_formatter();
    }
}

/// Threshold and optional formatter of one appender.
#[derive(Debug, Default)]
pub struct AppenderState {
    level: AtomicU8,
    formatter: RwLock<Option<Arc<LogFormatter>>>,
}

impl AppenderState {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level: AtomicU8::new(level as u8),
            formatter: RwLock::new(None),
        }
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    pub fn formatter(&self) -> Option<Arc<LogFormatter>> {
        self.formatter.read().clone()
    }

    pub fn set_formatter(&self, formatter: Arc<LogFormatter>) {
        *self.formatter.write() = Some(formatter);
    }

    pub fn clear_formatter(&self) {
        *self.formatter.write() = None;
    }

    /// Render through the assigned formatter, or the default layout.
    pub fn render(&self, level: LogLevel, event: &LogEvent) -> String {
        // Clone the handle so the lock is not held while formatting.
        match self.formatter() {
            Some(formatter) => formatter.format(level, event),
            None => default_layout().format(level, event),
        }
    }
}

fn default_layout() -> &'static LogFormatter {
    static DEFAULT: OnceLock<LogFormatter> = OnceLock::new();
    DEFAULT.get_or_init(LogFormatter::default_layout)
}
