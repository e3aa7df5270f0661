//! Property-based tests for zapper using proptest

use proptest::prelude::*;
use zapper::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let as_str = level.to_str();
        let parsed: LogLevel = as_str.parse().unwrap();
        assert_eq!(level, parsed);
        assert_eq!(LogLevel::from_config_str(as_str), level);
    }

    /// Test that LogLevel ordering is consistent
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;

        assert_eq!(level1 <= level2, val1 <= val2);
        assert_eq!(level1 < level2, val1 < val2);
    }

    /// Test that parsing accepts case-insensitive input
    #[test]
    fn test_log_level_case_insensitive(use_lower in any::<bool>()) {
        for level_str in ["DEBUG", "INFO", "WARN", "ERROR", "FATAL"] {
            let input = if use_lower {
                level_str.to_lowercase()
            } else {
                level_str.to_string()
            };

            let parsed: std::result::Result<LogLevel, String> = input.parse();
            assert!(parsed.is_ok(), "Failed to parse: {}", input);
        }
    }

    /// Unknown level strings never fail configuration; they become info
    #[test]
    fn test_unknown_config_level_is_info(invalid_str in "[^dDiIwWeEfF]*") {
        assert_eq!(LogLevel::from_config_str(&invalid_str), LogLevel::Info);
    }

    /// Test that LogLevel JSON serialization roundtrips
    #[test]
    fn test_log_level_json_serialization(level in any_level()) {
        let json_str = serde_json::to_string(&level).unwrap();
        assert_eq!(json_str, format!("\"{}\"", level.to_str()));

        let deserialized: LogLevel = serde_json::from_str(&json_str).unwrap();
        assert_eq!(deserialized, level);
    }
}

// ============================================================================
// Level Gate Tests
// ============================================================================

proptest! {
    /// A gate accepting a level accepts every more severe level
    #[test]
    fn test_gate_monotonic(threshold in any_level(), a in any_level(), b in any_level()) {
        let gate = LevelGate::new(threshold);
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        if gate.enabled(low) {
            assert!(gate.enabled(high));
        }
        assert_eq!(gate.enabled(a), a >= threshold);
    }

    /// Clones observe every change made through any other clone
    #[test]
    fn test_gate_clones_share_state(levels in prop::collection::vec(any_level(), 1..20)) {
        let gate = LevelGate::new(LogLevel::Info);
        let clone = gate.clone();

        for level in levels {
            clone.set_level(level);
            assert_eq!(gate.level(), level);
        }
    }
}

// ============================================================================
// LogEntry Message Sanitization Tests (Security Critical!)
// ============================================================================

proptest! {
    /// Test that control characters are sanitized in log messages
    #[test]
    fn test_message_sanitization(message in ".*") {
        let entry = LogEntry::new(LogLevel::Info, message.clone());

        assert!(!entry.message.contains('\n'),
                "LogEntry contains unsanitized newline: {:?}", entry.message);
        assert!(!entry.message.contains('\r'),
                "LogEntry contains unsanitized carriage return: {:?}", entry.message);
        assert!(!entry.message.contains('\t'),
                "LogEntry contains unsanitized tab: {:?}", entry.message);

        if message.contains('\n') {
            assert!(entry.message.contains("\\n"),
                    "Newlines not properly escaped: {:?}", entry.message);
        }
    }

    /// Every encoded record is exactly one line, whatever the message or fields
    #[test]
    fn test_encoded_record_is_single_line(
        message in ".*",
        key in "[a-z_]{1,12}",
        value in ".*",
        level in any_level(),
        json in any::<bool>()
    ) {
        let encoder = if json { Encoder::json() } else { Encoder::text() };
        let context: LogContext = std::iter::once(Field::new(key, value)).collect();
        let entry = LogEntry::new(level, message)
            .with_context(context)
            .capture_stacktrace();

        let line = encoder.encode(&entry);
        assert!(!line.contains('\n'), "Encoded record spans lines: {:?}", line);

        if json {
            let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
            assert_eq!(parsed["level"], level.to_str());
            assert_eq!(parsed.get("stacktrace").is_some(), level >= LogLevel::Error);
        }
    }
}

// ============================================================================
// Appender Integration Tests
// ============================================================================

proptest! {
    /// Test that ConsoleAppender handles various log entries without failing
    #[test]
    fn test_console_appender_no_failure(
        messages in prop::collection::vec(".*", 0..10)
    ) {
        let mut appender = ConsoleAppender::with_target(std::io::sink());

        for message in messages {
            let entry = LogEntry::new(LogLevel::Info, message);
            let result = appender.append(&entry);
            assert!(result.is_ok(), "ConsoleAppender failed: {:?}", result);
        }
    }
}
