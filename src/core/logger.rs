//! Main logger implementation

use super::{
    appender::Appender, error::Result, log_event::LogEvent, log_level::LogLevel,
    metrics::LoggerMetrics,
};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Name given to the logger built by [`Logger::root`].
pub const ROOT_LOGGER_NAME: &str = "root";

/// A named, leveled dispatcher over an ordered list of appenders.
///
/// All methods take `&self`; share a logger as `Arc<Logger>` to log from
/// several threads. The same appender may be attached to any number of
/// loggers, and attaching it twice to one logger makes it receive each event
/// twice.
pub struct Logger {
    name: String,
    min_level: AtomicU8,
    appenders: RwLock<Vec<Arc<dyn Appender>>>,
    /// Metrics for observability (dispatched, filtered, failures)
    metrics: LoggerMetrics,
}

impl Logger {
    /// Create a logger with no appenders and a `Default` threshold.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_level: AtomicU8::new(LogLevel::Default as u8),
            appenders: RwLock::new(Vec::new()),
            metrics: LoggerMetrics::new(),
        }
    }

    /// Create the conventional root logger, named `"root"`.
    #[must_use]
    pub fn root() -> Self {
        Self::new(ROOT_LOGGER_NAME)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.min_level.load(Ordering::Relaxed))
    }

    pub fn set_level(&self, level: LogLevel) {
        self.min_level.store(level as u8, Ordering::Relaxed);
    }

    /// Whether an event at `level` would pass this logger's gate.
    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level.passes(self.level())
    }

    /// Append `appender` to the end of the dispatch list.
    pub fn add_appender(&self, appender: Arc<dyn Appender>) {
        self.appenders.write().push(appender);
    }

    /// Remove the first registration of `appender`.
    ///
    /// Appenders are matched by identity, not by value. Removing one that is
    /// not registered does nothing.
    pub fn del_appender(&self, appender: &Arc<dyn Appender>) {
        let mut appenders = self.appenders.write();
        if let Some(pos) = appenders.iter().position(|a| same_appender(a, appender)) {
            appenders.remove(pos);
        }
    }

    pub fn clear_appenders(&self) {
        self.appenders.write().clear();
    }

    /// Snapshot of the registered appenders, in dispatch order.
    pub fn appenders(&self) -> Vec<Arc<dyn Appender>> {
        self.appenders.read().clone()
    }

    pub fn appender_count(&self) -> usize {
        self.appenders.read().len()
    }

    /// Offer `event` to every appender if `level` passes this logger's gate.
    ///
    /// Dispatch runs over a snapshot of the appender list, so appenders may be
    /// added or removed concurrently. Every appender is offered the event even
    /// if an earlier one fails or panics; such failures are reported on stderr
    /// and counted in [`metrics`](Logger::metrics), never returned.
    pub fn log(&self, level: LogLevel, event: &LogEvent) {
        if !self.is_enabled(level) {
            self.metrics.record_filtered();
            return;
        }

        let appenders = self.appenders();
        self.metrics.record_dispatched();
        Self::dispatch(&self.name, &appenders, level, event, &self.metrics);
    }

    /// Deliver to each appender with per-appender panic isolation
    fn dispatch(
        logger_name: &str,
        appenders: &[Arc<dyn Appender>],
        level: LogLevel,
        event: &LogEvent,
        metrics: &LoggerMetrics,
    ) {
        for (idx, appender) in appenders.iter().enumerate() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.log(level, event)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Logger '{}': appender #{} ({}) failed: {}",
                        logger_name,
                        idx,
                        appender.name(),
                        e
                    );
                    metrics.record_appender_failure();
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Logger '{}': appender #{} ({}) panicked: {}. \
                         Other appenders continue to function.",
                        logger_name,
                        idx,
                        appender.name(),
                        panic_msg
                    );
                    metrics.record_appender_failure();
                }
            }
        }
    }

    #[inline]
    pub fn debug(&self, event: &LogEvent) {
        self.log(LogLevel::Debug, event);
    }

    #[inline]
    pub fn info(&self, event: &LogEvent) {
        self.log(LogLevel::Info, event);
    }

    #[inline]
    pub fn warn(&self, event: &LogEvent) {
        self.log(LogLevel::Warn, event);
    }

    #[inline]
    pub fn error(&self, event: &LogEvent) {
        self.log(LogLevel::Error, event);
    }

    #[inline]
    pub fn fatal(&self, event: &LogEvent) {
        self.log(LogLevel::Fatal, event);
    }

    /// Flush every appender.
    ///
    /// A failing appender does not stop the others from being flushed. Each
    /// failure is reported on stderr and counted; the first one is returned
    /// once every appender has been tried.
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for (idx, appender) in self.appenders().iter().enumerate() {
            if let Err(e) = appender.flush() {
                eprintln!(
                    "[LOGGER ERROR] Logger '{}': appender #{} ({}) flush failed: {}",
                    self.name,
                    idx,
                    appender.name(),
                    e
                );
                self.metrics.record_appender_failure();
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use appender_log::prelude::*;
    /// use std::sync::Arc;
    ///
    /// let logger = Logger::builder()
    ///     .name("http")
    ///     .level(LogLevel::Info)
    ///     .appender(Arc::new(StdoutAppender::new()))
    ///     .build();
    /// assert_eq!(logger.name(), "http");
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::root()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("appenders", &self.appender_count())
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        for appender in self.appenders.get_mut().iter() {
            if let Err(e) = appender.flush() {
                eprintln!(
                    "[LOGGER ERROR] Logger '{}': failed to flush appender {} during shutdown: {}",
                    self.name,
                    appender.name(),
                    e
                );
            }
        }
    }
}

/// Identity comparison that ignores vtable pointers.
fn same_appender(a: &Arc<dyn Appender>, b: &Arc<dyn Appender>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}

/// Builder for constructing Logger with a fluent API
pub struct LoggerBuilder {
    name: String,
    min_level: LogLevel,
    appenders: Vec<Arc<dyn Appender>>,
}

impl LoggerBuilder {
    /// Create a new builder named `"root"` with a `Default` threshold
    pub fn new() -> Self {
        Self {
            name: ROOT_LOGGER_NAME.to_string(),
            min_level: LogLevel::Default,
            appenders: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Add an appender; dispatch order follows the order of these calls
    #[must_use = "builder methods return a new value"]
    pub fn appender(mut self, appender: Arc<dyn Appender>) -> Self {
        self.appenders.push(appender);
        self
    }

    pub fn build(self) -> Logger {
        let logger = Logger::new(self.name);
        logger.set_level(self.min_level);
        for appender in self.appenders {
            logger.add_appender(appender);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::appender::AppenderState;
    use crate::core::error::LoggerError;
    use parking_lot::Mutex;

    /// Records `(tag, level)` for every event it writes into a shared journal.
    struct TaggedAppender {
        tag: &'static str,
        state: AppenderState,
        journal: Arc<Mutex<Vec<(&'static str, LogLevel)>>>,
    }

    impl TaggedAppender {
        fn new(
            tag: &'static str,
            journal: &Arc<Mutex<Vec<(&'static str, LogLevel)>>>,
        ) -> Arc<dyn Appender> {
            Arc::new(Self {
                tag,
                state: AppenderState::new(LogLevel::Default),
                journal: Arc::clone(journal),
            })
        }
    }

    impl Appender for TaggedAppender {
        fn state(&self) -> &AppenderState {
            &self.state
        }

        fn name(&self) -> &str {
            self.tag
        }

        fn write_line(&self, level: LogLevel, _line: &str) -> Result<()> {
            self.journal.lock().push((self.tag, level));
            Ok(())
        }
    }

    struct FailingAppender {
        state: AppenderState,
        panic: bool,
    }

    impl Appender for FailingAppender {
        fn state(&self) -> &AppenderState {
            &self.state
        }

        fn name(&self) -> &str {
            "failing"
        }

        fn write_line(&self, _level: LogLevel, _line: &str) -> Result<()> {
            if self.panic {
                panic!("sink exploded");
            }
            Err(LoggerError::writer("simulated failure"))
        }
    }

    fn journal() -> Arc<Mutex<Vec<(&'static str, LogLevel)>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    #[test]
    fn test_builder_basic() {
        let logger = Logger::builder().name("db").level(LogLevel::Warn).build();
        assert_eq!(logger.name(), "db");
        assert_eq!(logger.level(), LogLevel::Warn);
        assert_eq!(logger.appender_count(), 0);
    }

    #[test]
    fn test_builder_default() {
        let logger = LoggerBuilder::default().build();
        assert_eq!(logger.name(), ROOT_LOGGER_NAME);
        assert_eq!(logger.level(), LogLevel::Default);
    }

    #[test]
    fn test_logger_gate() {
        let journal = journal();
        let logger = Logger::builder()
            .level(LogLevel::Warn)
            .appender(TaggedAppender::new("a", &journal))
            .build();

        logger.info(&LogEvent::new("dropped"));
        logger.warn(&LogEvent::new("kept"));
        logger.fatal(&LogEvent::new("kept"));

        assert_eq!(
            *journal.lock(),
            vec![("a", LogLevel::Warn), ("a", LogLevel::Fatal)]
        );
        assert_eq!(logger.metrics().filtered_count(), 1);
        assert_eq!(logger.metrics().dispatched_count(), 2);
    }

    #[test]
    fn test_dispatch_order_and_duplicates() {
        let journal = journal();
        let x = TaggedAppender::new("x", &journal);
        let y = TaggedAppender::new("y", &journal);
        let logger = Logger::root();
        logger.add_appender(Arc::clone(&x));
        logger.add_appender(Arc::clone(&y));
        logger.add_appender(Arc::clone(&x));

        logger.debug(&LogEvent::new("e"));

        let tags: Vec<_> = journal.lock().iter().map(|(tag, _)| *tag).collect();
        assert_eq!(tags, vec!["x", "y", "x"]);
    }

    #[test]
    fn test_del_appender() {
        let journal = journal();
        let x = TaggedAppender::new("x", &journal);
        let y = TaggedAppender::new("y", &journal);
        let z = TaggedAppender::new("z", &journal);
        let stranger = TaggedAppender::new("stranger", &journal);

        let logger = Logger::root();
        for appender in [&x, &y, &z, &x] {
            logger.add_appender(Arc::clone(appender));
        }

        logger.del_appender(&stranger);
        assert_eq!(logger.appender_count(), 4);

        // Only the first registration of x goes away.
        logger.del_appender(&x);
        let names: Vec<String> = logger
            .appenders()
            .iter()
            .map(|a| a.name().to_string())
            .collect();
        assert_eq!(names, vec!["y", "z", "x"]);

        logger.clear_appenders();
        assert_eq!(logger.appender_count(), 0);
    }

    #[test]
    fn test_failing_appenders_do_not_stop_dispatch() {
        let journal = journal();
        let logger = Logger::root();
        logger.add_appender(Arc::new(FailingAppender {
            state: AppenderState::default(),
            panic: false,
        }));
        logger.add_appender(Arc::new(FailingAppender {
            state: AppenderState::default(),
            panic: true,
        }));
        logger.add_appender(TaggedAppender::new("after", &journal));

        logger.error(&LogEvent::new("still delivered"));

        assert_eq!(*journal.lock(), vec![("after", LogLevel::Error)]);
        assert_eq!(logger.metrics().appender_failures(), 2);
    }

    /// Counts flushes, optionally failing every one of them.
    struct FlushCountingAppender {
        state: AppenderState,
        fail_flush: bool,
        flushes: std::sync::atomic::AtomicUsize,
    }

    impl FlushCountingAppender {
        fn new(fail_flush: bool) -> Arc<Self> {
            Arc::new(Self {
                state: AppenderState::default(),
                fail_flush,
                flushes: std::sync::atomic::AtomicUsize::new(0),
            })
        }

        fn flushes(&self) -> usize {
            self.flushes.load(std::sync::atomic::Ordering::Relaxed)
        }
    }

    impl Appender for FlushCountingAppender {
        fn state(&self) -> &AppenderState {
            &self.state
        }

        fn name(&self) -> &str {
            "flush-counting"
        }

        fn write_line(&self, _level: LogLevel, _line: &str) -> Result<()> {
            Ok(())
        }

        fn flush(&self) -> Result<()> {
            self.flushes
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            if self.fail_flush {
                return Err(LoggerError::writer("flush refused"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_flush_continues_past_failing_appender() {
        let broken = FlushCountingAppender::new(true);
        let healthy = FlushCountingAppender::new(false);
        let logger = Logger::root();
        logger.add_appender(broken.clone());
        logger.add_appender(healthy.clone());

        let result = logger.flush();

        assert!(matches!(result, Err(LoggerError::WriterError(_))));
        assert_eq!(broken.flushes(), 1);
        assert_eq!(healthy.flushes(), 1);
        assert_eq!(logger.metrics().appender_failures(), 1);

        logger.del_appender(&(broken.clone() as Arc<dyn Appender>));
        assert!(logger.flush().is_ok());
        assert_eq!(healthy.flushes(), 2);
    }

    #[test]
    fn test_set_level_at_runtime() {
        let logger = Logger::root();
        assert!(logger.is_enabled(LogLevel::Default));
        logger.set_level(LogLevel::Error);
        assert_eq!(logger.level(), LogLevel::Error);
        assert!(!logger.is_enabled(LogLevel::Warn));
        assert!(logger.is_enabled(LogLevel::Fatal));

        for level in LogLevel::ALL {
            logger.set_level(level);
            assert_eq!(logger.level(), level);
        }
    }
}
