//! Timestamp formatting utilities
//!
//! Backs the `%d` directive of [`LogFormatter`](crate::LogFormatter).
//! Supports a plain date-time layout, ISO 8601, RFC 3339, Unix timestamps and
//! custom strftime strings.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use appender_log::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::Iso8601;
/// let text = format.format(&Utc::now());
/// assert!(text.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Plain date and time: `2025-01-08 10:30:45`
    ///
    /// This is what a bare `%d` renders.
    #[default]
    DateTime,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format, validated by [`TimestampFormat::parse`]
    Custom(String),
}

/// Placeholder written when a custom format cannot be rendered.
const INVALID_TIMESTAMP: &str = "<invalid-timestamp>";

impl TimestampFormat {
    /// Resolve the body of a `%d{...}` directive.
    ///
    /// The names `iso8601`, `rfc3339`, `unix` and `unix_millis` select the
    /// matching variant; anything else is treated as a strftime string and
    /// rejected if chrono cannot parse it.
    pub fn parse(spec: &str) -> Result<Self> {
        match spec {
            "" => Ok(TimestampFormat::DateTime),
            "iso8601" => Ok(TimestampFormat::Iso8601),
            "rfc3339" => Ok(TimestampFormat::Rfc3339),
            "unix" => Ok(TimestampFormat::Unix),
            "unix_millis" => Ok(TimestampFormat::UnixMillis),
            custom => {
                if StrftimeItems::new(custom).any(|item| matches!(item, Item::Error)) {
                    return Err(LoggerError::formatter(
                        custom,
                        "invalid strftime specifier in %d{...}",
                    ));
                }
                Ok(TimestampFormat::Custom(custom.to_string()))
            }
        }
    }

    /// Format a `DateTime<Utc>` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        let mut out = String::new();
        self.write_to(&mut out, datetime);
        out
    }

    /// Append the formatted timestamp to `out`.
    ///
    /// Never panics: a custom string chrono refuses to render is replaced by
    /// a placeholder.
    pub fn write_to(&self, out: &mut String, datetime: &DateTime<Utc>) {
        let written = match self {
            TimestampFormat::DateTime => {
                write!(out, "{}", datetime.format("%Y-%m-%d %H:%M:%S"))
            }
            TimestampFormat::Iso8601 => {
                write!(out, "{}", datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ"))
            }
            TimestampFormat::Rfc3339 => write!(out, "{}", datetime.to_rfc3339()),
            TimestampFormat::Unix => write!(out, "{}", datetime.timestamp()),
            TimestampFormat::UnixMillis => write!(out, "{}", datetime.timestamp_millis()),
            TimestampFormat::Custom(format_str) => {
                let mark = out.len();
                let result = write!(out, "{}", datetime.format(format_str));
                if result.is_err() {
                    out.truncate(mark);
                }
                result
            }
        };
        if written.is_err() {
            out.push_str(INVALID_TIMESTAMP);
        }
    }
}
