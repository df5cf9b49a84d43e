//! Console appender implementation

use crate::core::{Appender, AppenderState, LogFormatter, LogLevel, Result};
#[cfg(feature = "console")]
use colored::Colorize;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Writes each rendered line, followed by `\n`, to standard output.
///
/// Write failures on the console are ignored. [`with_writer`] points the same
/// appender at any other `io::Write` target.
///
/// [`with_writer`]: StdoutAppender::with_writer
pub struct StdoutAppender {
    state: AppenderState,
    target: Mutex<Box<dyn Write + Send>>,
    use_colors: bool,
}

impl StdoutAppender {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Console-style appender over an arbitrary writer.
    ///
    /// # Example
    ///
    /// ```
    /// use appender_log::prelude::*;
    ///
    /// let appender = StdoutAppender::with_writer(std::io::sink())
    ///     .with_level(LogLevel::Warn);
    /// assert_eq!(appender.level(), LogLevel::Warn);
    /// ```
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            state: AppenderState::new(LogLevel::Default),
            target: Mutex::new(Box::new(writer)),
            use_colors: false,
        }
    }

    #[must_use]
    pub fn with_level(self, level: LogLevel) -> Self {
        self.state.set_level(level);
        self
    }

    #[must_use]
    pub fn with_formatter(self, formatter: Arc<LogFormatter>) -> Self {
        self.state.set_formatter(formatter);
        self
    }

    /// Colour whole lines by level. Has no effect without the `console`
    /// feature.
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[cfg(feature = "console")]
    fn decorate(&self, level: LogLevel, line: &str) -> String {
        if self.use_colors {
            line.color(level.color_code()).to_string()
        } else {
            line.to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn decorate(&self, _level: LogLevel, line: &str) -> String {
        line.to_string()
    }
}

impl Default for StdoutAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for StdoutAppender {
    fn state(&self) -> &AppenderState {
        &self.state
    }

    fn name(&self) -> &str {
        "stdout"
    }

    fn write_line(&self, level: LogLevel, line: &str) -> Result<()> {
        let output = self.decorate(level, line);
        let mut target = self.target.lock();
        // Console failures are not surfaced to callers.
        let _ = writeln!(target, "{}", output);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let _ = self.target.lock().flush();
        Ok(())
    }
}
