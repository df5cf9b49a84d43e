//! Logging macros for ergonomic log message formatting.
//!
//! These macros build a [`LogEvent`](crate::LogEvent) stamped with the call
//! site's `file!()` and `line!()`, then hand it to a logger. The message is
//! only formatted when the logger's own threshold lets the level through.
//!
//! # Examples
//!
//! ```
//! use appender_log::prelude::*;
//! use appender_log::info;
//! use std::sync::Arc;
//!
//! let logger = Logger::root();
//! logger.add_appender(Arc::new(StdoutAppender::new()));
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use appender_log::prelude::*;
/// # let logger = Logger::root();
/// use appender_log::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let level = $level;
        let logger = &$logger;
        if logger.is_enabled(level) {
            let event = $crate::LogEvent::new(format!($($arg)+))
                .with_location(file!(), line!());
            logger.log(level, &event);
        } else {
            logger.metrics().record_filtered();
        }
    }};
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use appender_log::prelude::*;
/// # let logger = Logger::root();
/// use appender_log::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use appender_log::prelude::*;
/// # let logger = Logger::root();
/// use appender_log::error;
/// let err = "connection refused";
/// error!(logger, "Failed to connect: {}", err);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
