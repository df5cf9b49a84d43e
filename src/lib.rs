//! # Appender Log
//!
//! A hierarchical, level-filtered logging core.
//!
//! Callers build a [`LogEvent`] and hand it to a named [`Logger`]. The logger
//! drops events below its threshold and offers the rest, in registration
//! order, to its [`Appender`]s. Each appender applies its own threshold,
//! renders the event through its [`LogFormatter`] (or the default layout) and
//! writes the line to its target.
//!
//! ## Features
//!
//! - **Two gates**: logger and appender thresholds are independent
//! - **Shared sinks**: one appender or formatter can serve many loggers
//! - **Pattern formatting**: `%d %p %m ...` templates, validated up front
//! - **Thread safe**: every operation takes `&self`
//!
//! ```
//! use appender_log::prelude::*;
//! use std::sync::Arc;
//!
//! let logger = Logger::builder()
//!     .level(LogLevel::Info)
//!     .appender(Arc::new(StdoutAppender::new()))
//!     .build();
//!
//! logger.info(&LogEvent::new("service ready"));
//! logger.debug(&LogEvent::new("not printed"));
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{FileAppender, StdoutAppender};
    pub use crate::core::{
        Appender, AppenderState, LogEvent, LogFormatter, LogLevel, Logger, LoggerBuilder,
        LoggerError, LoggerMetrics, LoggerRegistry, Result, TimestampFormat,
    };
}

pub use appenders::{FileAppender, StdoutAppender};
pub use core::{
    current_task_id, current_thread_id, elapsed_since_start, enter_task, global, install_global,
    Appender, AppenderState, LogEvent, LogFormatter, LogLevel, Logger, LoggerBuilder, LoggerError,
    LoggerMetrics, LoggerRegistry, Result, TaskGuard, TimestampFormat, DEFAULT_PATTERN,
    ROOT_LOGGER_NAME, UNKNOWN_FILE,
};
