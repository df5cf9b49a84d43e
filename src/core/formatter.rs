//! Pattern-based rendering of log events
//!
//! A [`LogFormatter`] compiles a `%`-directive template once and renders
//! `(level, event)` pairs with it:
//!
//! | Directive   | Output                                          |
//! |-------------|-------------------------------------------------|
//! | `%m`        | message                                         |
//! | `%p`        | level name                                      |
//! | `%r`        | milliseconds elapsed since process start        |
//! | `%t`        | thread id                                       |
//! | `%F`        | task (fiber) id                                 |
//! | `%d`        | timestamp, `%d{fmt}` picks a [`TimestampFormat`] |
//! | `%f` / `%l` | source file / line                              |
//! | `%T` / `%n` | tab / newline                                   |
//! | `%%`        | a literal `%`                                   |

use super::error::{LoggerError, Result};
use super::log_event::LogEvent;
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use parking_lot::RwLock;
use std::fmt::Write;

/// Layout used by appenders that have no formatter of their own.
///
/// Field order: timestamp, thread id, task id, level, file:line, elapsed,
/// message.
pub const DEFAULT_PATTERN: &str = "%d%T%t%T%F%T[%p]%T%f:%l%T%r%T%m";

/// Rendered in place of the source file when the event carries none.
pub const UNKNOWN_FILE: &str = "<unknown>";

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Message,
    Level,
    Elapsed,
    ThreadId,
    TaskId,
    Timestamp(TimestampFormat),
    File,
    Line,
}

/// Renders log events through a compiled pattern.
///
/// A formatter is usually shared as `Arc<LogFormatter>` between appenders.
/// [`set_pattern`](LogFormatter::set_pattern) swaps the pattern in place, so
/// every holder renders with the new pattern from its next event on.
#[derive(Debug)]
pub struct LogFormatter {
    compiled: RwLock<Compiled>,
}

#[derive(Debug, Clone)]
struct Compiled {
    source: String,
    segments: Vec<Segment>,
}

impl LogFormatter {
    /// Compile `pattern`, rejecting unknown directives, a dangling `%` and
    /// malformed `%d{...}` bodies.
    ///
    /// # Examples
    ///
    /// ```
    /// use appender_log::{LogEvent, LogFormatter, LogLevel};
    ///
    /// let formatter = LogFormatter::new("[%p] %m").unwrap();
    /// let line = formatter.format(LogLevel::Warn, &LogEvent::new("disk almost full"));
    /// assert_eq!(line, "[WARN] disk almost full");
    /// ```
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            compiled: RwLock::new(compile(pattern)?),
        })
    }

    /// Formatter for [`DEFAULT_PATTERN`].
    pub fn default_layout() -> Self {
        Self {
            compiled: RwLock::new(Compiled {
                source: DEFAULT_PATTERN.to_string(),
                segments: default_segments(),
            }),
        }
    }

    /// Replace the pattern. On error the previous pattern stays active.
    pub fn set_pattern(&self, pattern: &str) -> Result<()> {
        let compiled = compile(pattern)?;
        *self.compiled.write() = compiled;
        Ok(())
    }

    /// Source text of the active pattern.
    pub fn pattern(&self) -> String {
        self.compiled.read().source.clone()
    }

    /// Render `event` at `level`. Never fails.
    pub fn format(&self, level: LogLevel, event: &LogEvent) -> String {
        let compiled = self.compiled.read();
        let mut out = String::with_capacity(event.message().len() + 64);
        for segment in &compiled.segments {
            // Writing into a String cannot fail.
            let _ = match segment {
                Segment::Literal(text) => {
                    out.push_str(text);
                    Ok(())
                }
                Segment::Message => {
                    out.push_str(event.message());
                    Ok(())
                }
                Segment::Level => {
                    out.push_str(level.to_str());
                    Ok(())
                }
                Segment::Elapsed => write!(out, "{}", event.elapsed().as_millis()),
                Segment::ThreadId => write!(out, "{}", event.thread_id()),
                Segment::TaskId => write!(out, "{}", event.task_id()),
                Segment::Timestamp(format) => {
                    format.write_to(&mut out, event.timestamp());
                    Ok(())
                }
                Segment::File => {
                    out.push_str(event.file().unwrap_or(UNKNOWN_FILE));
                    Ok(())
                }
                Segment::Line => write!(out, "{}", event.line()),
            };
        }
        out
    }
}

impl Default for LogFormatter {
    fn default() -> Self {
        Self::default_layout()
    }
}

impl Clone for LogFormatter {
    /// Produces an independent formatter; later `set_pattern` calls on either
    /// copy do not affect the other.
    fn clone(&self) -> Self {
        Self {
            compiled: RwLock::new(self.compiled.read().clone()),
        }
    }
}

fn default_segments() -> Vec<Segment> {
    let tab = || Segment::Literal("\t".to_string());
    vec![
        Segment::Timestamp(TimestampFormat::DateTime),
        tab(),
        Segment::ThreadId,
        tab(),
        Segment::TaskId,
        Segment::Literal("\t[".to_string()),
        Segment::Level,
        Segment::Literal("]\t".to_string()),
        Segment::File,
        Segment::Literal(":".to_string()),
        Segment::Line,
        tab(),
        Segment::Elapsed,
        tab(),
        Segment::Message,
    ]
}

fn compile(pattern: &str) -> Result<Compiled> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }

        let directive = chars
            .next()
            .ok_or_else(|| LoggerError::formatter(pattern, "pattern ends with a dangling '%'"))?;

        let segment = match directive {
            '%' => {
                literal.push('%');
                continue;
            }
            'T' => {
                literal.push('\t');
                continue;
            }
            'n' => {
                literal.push('\n');
                continue;
            }
            'm' => Segment::Message,
            'p' => Segment::Level,
            'r' => Segment::Elapsed,
            't' => Segment::ThreadId,
            'F' => Segment::TaskId,
            'f' => Segment::File,
            'l' => Segment::Line,
            'd' => {
                let mut spec = String::new();
                if chars.peek() == Some(&'{') {
                    chars.next();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        spec.push(c);
                    }
                    if !closed {
                        return Err(LoggerError::formatter(pattern, "unterminated '%d{' block"));
                    }
                }
                Segment::Timestamp(TimestampFormat::parse(&spec)?)
            }
            other => {
                return Err(LoggerError::formatter(
                    pattern,
                    format!("unknown directive '%{}'", other),
                ))
            }
        };

        if !literal.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        segments.push(segment);
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok(Compiled {
        source: pattern.to_string(),
        segments,
    })
}
