//! Core logger types and traits

pub mod appender;
pub mod error;
pub mod formatter;
pub mod identity;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod registry;
pub mod timestamp;

pub use appender::{Appender, AppenderState};
pub use error::{LoggerError, Result};
pub use formatter::{LogFormatter, DEFAULT_PATTERN, UNKNOWN_FILE};
pub use identity::{current_task_id, current_thread_id, elapsed_since_start, enter_task, TaskGuard};
pub use log_event::LogEvent;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, ROOT_LOGGER_NAME};
pub use metrics::LoggerMetrics;
pub use registry::{global, install_global, LoggerRegistry};
pub use timestamp::TimestampFormat;
