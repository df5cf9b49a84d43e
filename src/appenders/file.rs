//! File appender implementation

use crate::core::{Appender, AppenderState, LogFormatter, LogLevel, LoggerError, Result};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Appends rendered lines to a file.
///
/// The path is fixed at construction. While the stream is closed (the path
/// could not be opened), events are dropped silently; [`reopen`] is the only
/// place an open failure is reported. Writes and reopens are serialized by
/// one lock, so a line never lands on a stream that is mid-reopen.
///
/// [`reopen`]: FileAppender::reopen
pub struct FileAppender {
    state: AppenderState,
    path: PathBuf,
    writer: Mutex<Option<BufWriter<File>>>,
    auto_flush: bool,
}

impl FileAppender {
    /// Create an appender and try to open `path` for appending.
    ///
    /// If the open fails the appender starts closed; call
    /// [`reopen`](FileAppender::reopen) to retry and see the error.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let appender = Self::closed(path.into());
        let _ = appender.reopen();
        appender
    }

    /// Like [`new`](FileAppender::new) but fails if the file cannot be opened.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let appender = Self::closed(path.into());
        appender.reopen()?;
        Ok(appender)
    }

    fn closed(path: PathBuf) -> Self {
        Self {
            state: AppenderState::new(LogLevel::Default),
            path,
            writer: Mutex::new(None),
            auto_flush: false,
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

    /// Flush the buffer after every line.
    #[must_use]
    pub fn with_auto_flush(mut self, auto_flush: bool) -> Self {
        self.auto_flush = auto_flush;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.writer.lock().is_some()
    }

    /// Close the current stream, if any, and open the path again for
    /// appending.
    ///
    /// On failure the appender is left closed. Calling this repeatedly is
    /// safe.
    pub fn reopen(&self) -> Result<()> {
        let mut writer = self.writer.lock();

        if let Some(mut previous) = writer.take() {
            if let Err(e) = previous.flush() {
                eprintln!(
                    "[LOGGER ERROR] Failed to flush '{}' before reopening: {}",
                    self.path.display(),
                    e
                );
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}' for appending", self.path.display()),
                    e,
                )
            })?;

        *writer = Some(BufWriter::new(file));
        Ok(())
    }
}

impl Appender for FileAppender {
    fn state(&self) -> &AppenderState {
        &self.state
    }

    fn name(&self) -> &str {
        "file"
    }

    fn write_line(&self, _level: LogLevel, line: &str) -> Result<()> {
        let mut guard = self.writer.lock();
        let Some(writer) = guard.as_mut() else {
            return Ok(());
        };

        writeln!(writer, "{}", line)
            .map_err(|e| LoggerError::file_appender(self.path.display().to_string(), e.to_string()))?;
        if self.auto_flush {
            writer.flush()?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        if let Some(writer) = self.writer.lock().as_mut() {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogEvent;
    use std::fs;
    use tempfile::TempDir;

    fn plain() -> Arc<LogFormatter> {
        Arc::new(LogFormatter::new("%p %m").unwrap())
    }

    #[test]
    fn test_appends_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "existing\n").unwrap();

        let appender = FileAppender::open(&path).unwrap().with_formatter(plain());
        appender.log(LogLevel::Info, &LogEvent::new("one")).unwrap();
        appender.log(LogLevel::Error, &LogEvent::new("two")).unwrap();
        appender.flush().unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "existing\nINFO one\nERROR two\n"
        );
    }

    #[test]
    fn test_unopenable_path_is_closed_and_silent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing_dir").join("app.log");

        assert!(FileAppender::open(&path).is_err());

        let appender = FileAppender::new(&path);
        assert!(!appender.is_open());
        assert!(appender.log(LogLevel::Fatal, &LogEvent::new("dropped")).is_ok());
        assert!(matches!(
            appender.reopen(),
            Err(LoggerError::IoOperation { .. })
        ));
        assert!(!appender.is_open());
    }

    #[test]
    fn test_reopen_is_repeatable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let appender = FileAppender::new(&path).with_formatter(plain());

        appender.log(LogLevel::Info, &LogEvent::new("before")).unwrap();
        appender.reopen().unwrap();
        appender.reopen().unwrap();
        assert!(appender.is_open());
        appender.log(LogLevel::Info, &LogEvent::new("after")).unwrap();
        appender.flush().unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "INFO before\nINFO after\n"
        );
    }

    #[test]
    fn test_reopen_recovers_after_directory_appears() {
        let dir = TempDir::new().unwrap();
        let log_dir = dir.path().join("later");
        let path = log_dir.join("app.log");

        let appender = FileAppender::new(&path).with_formatter(plain());
        appender.log(LogLevel::Info, &LogEvent::new("lost")).unwrap();

        fs::create_dir(&log_dir).unwrap();
        appender.reopen().unwrap();
        appender.log(LogLevel::Info, &LogEvent::new("kept")).unwrap();
        appender.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "INFO kept\n");
    }

    #[test]
    fn test_auto_flush_and_threshold() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let appender = FileAppender::new(&path)
            .with_formatter(plain())
            .with_level(LogLevel::Warn)
            .with_auto_flush(true);

        appender.log(LogLevel::Info, &LogEvent::new("filtered")).unwrap();
        appender.log(LogLevel::Warn, &LogEvent::new("visible")).unwrap();

        // No explicit flush.
        assert_eq!(fs::read_to_string(&path).unwrap(), "WARN visible\n");
        assert_eq!(appender.path(), path.as_path());
    }
}
