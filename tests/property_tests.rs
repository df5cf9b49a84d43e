//! Property-based tests for appender_log using proptest

use appender_log::prelude::*;
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Default),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]
}

/// Counts how often it is offered an event and how often it writes one.
#[derive(Default)]
struct CountingAppender {
    state: AppenderState,
    offered: AtomicUsize,
    written: AtomicUsize,
}

impl Appender for CountingAppender {
    fn state(&self) -> &AppenderState {
        &self.state
    }

    fn name(&self) -> &str {
        "counting"
    }

    fn write_line(&self, _level: LogLevel, _line: &str) -> Result<()> {
        self.written.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn log(&self, level: LogLevel, event: &LogEvent) -> Result<()> {
        self.offered.fetch_add(1, Ordering::Relaxed);
        if !level.passes(self.state.level()) {
            return Ok(());
        }
        let line = self.state.render(level, event);
        self.write_line(level, &line)
    }
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Test that LogLevel ordering matches the ordinal
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;

        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1 < level2, val1 < val2);
        prop_assert_eq!(level1.passes(level2), val1 >= val2);
    }

    /// Test that parsing accepts case-insensitive input
    #[test]
    fn test_log_level_case_insensitive(level in any_level(), use_lower in any::<bool>()) {
        let input = if use_lower {
            level.to_str().to_lowercase()
        } else {
            level.to_str().to_string()
        };
        prop_assert_eq!(input.parse::<LogLevel>(), Ok(level));
    }
}

// ============================================================================
// Gating Tests
// ============================================================================

proptest! {
    /// A logger offers the event to every appender iff level >= threshold
    #[test]
    fn test_logger_gate(level in any_level(), threshold in any_level(), count in 1usize..5) {
        let logger = Logger::builder().level(threshold).build();
        let appenders: Vec<Arc<CountingAppender>> =
            (0..count).map(|_| Arc::new(CountingAppender::default())).collect();
        for appender in &appenders {
            logger.add_appender(appender.clone());
        }

        logger.log(level, &LogEvent::new("gated"));

        let expected = usize::from(level >= threshold);
        for appender in &appenders {
            prop_assert_eq!(appender.offered.load(Ordering::Relaxed), expected);
        }
    }

    /// Once offered, an appender writes iff level >= its own threshold
    #[test]
    fn test_appender_gate(level in any_level(), appender_level in any_level()) {
        let logger = Logger::builder().level(LogLevel::Default).build();
        let appender = Arc::new(CountingAppender::default());
        appender.set_level(appender_level);
        logger.add_appender(appender.clone());

        logger.log(level, &LogEvent::new("gated"));

        prop_assert_eq!(appender.offered.load(Ordering::Relaxed), 1);
        prop_assert_eq!(
            appender.written.load(Ordering::Relaxed),
            usize::from(level >= appender_level)
        );
    }

    /// Both gates combine: a write happens iff level clears both thresholds
    #[test]
    fn test_both_gates(
        level in any_level(),
        logger_level in any_level(),
        appender_level in any_level(),
    ) {
        let logger = Logger::builder().level(logger_level).build();
        let appender = Arc::new(CountingAppender::default());
        appender.set_level(appender_level);
        logger.add_appender(appender.clone());

        logger.log(level, &LogEvent::new("gated"));

        let expected = level >= logger_level && level >= appender_level;
        prop_assert_eq!(appender.written.load(Ordering::Relaxed), usize::from(expected));
    }
}

// ============================================================================
// Formatter Tests
// ============================================================================

proptest! {
    /// The default layout always carries the level name and the message
    #[test]
    fn test_default_layout_contains_level_and_message(
        level in any_level(),
        message in "[a-zA-Z0-9 ]{0,64}",
    ) {
        let line = LogFormatter::default().format(level, &LogEvent::new(message.clone()));
        prop_assert!(line.contains(level.to_str()));
        prop_assert!(line.ends_with(&message));
    }

    /// Literal text without '%' compiles and renders unchanged
    #[test]
    fn test_literal_patterns(text in "[^%]{0,32}") {
        let formatter = LogFormatter::new(&text).unwrap();
        prop_assert_eq!(formatter.format(LogLevel::Info, &LogEvent::new("x")), text);
    }
}
