//! Log event structure

use super::identity;
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::time::Duration;

/// One logging occurrence.
///
/// An event is built once by the caller and then handed to a
/// [`Logger`](crate::Logger) by shared reference. The `with_*` methods
/// consume the value, so they can only run before that handoff; after it,
/// every collaborator sees the same read-only data.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    file: Option<Cow<'static, str>>,
    line: u32,
    elapsed: Duration,
    thread_id: u64,
    task_id: u64,
    timestamp: DateTime<Utc>,
    message: String,
}

impl LogEvent {
    /// Create an event for `message`, filling elapsed time, thread and task
    /// identity and the timestamp from the current context.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            file: None,
            line: 0,
            elapsed: identity::elapsed_since_start(),
            thread_id: identity::current_thread_id(),
            task_id: identity::current_task_id(),
            timestamp: Utc::now(),
            message: message.into(),
        }
    }

    /// Create an event with every field supplied explicitly.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        file: Option<Cow<'static, str>>,
        line: u32,
        elapsed: Duration,
        thread_id: u64,
        task_id: u64,
        timestamp: DateTime<Utc>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file,
            line,
            elapsed,
            thread_id,
            task_id,
            timestamp,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_location(mut self, file: impl Into<Cow<'static, str>>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = line;
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    #[must_use]
    pub fn with_thread_id(mut self, thread_id: u64) -> Self {
        self.thread_id = thread_id;
        self
    }

    #[must_use]
    pub fn with_task_id(mut self, task_id: u64) -> Self {
        self.task_id = task_id;
        self
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn thread_id(&self) -> u64 {
        self.thread_id
    }

    pub fn task_id(&self) -> u64 {
        self.task_id
    }

    pub fn timestamp(&self) -> &DateTime<Utc> {
        &self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
