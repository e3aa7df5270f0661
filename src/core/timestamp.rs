//! Timestamp formatting utilities
//!
//! Every variant renders an ISO 8601 compatible string so the `timestamp`
//! key keeps a single meaning across sinks; the variants differ only in
//! precision and zone.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// ISO 8601 timestamp layouts
///
/// # Examples
///
/// ```
/// use zapper::TimestampFormat;
/// use chrono::Utc;
///
/// let stamp = TimestampFormat::Iso8601.format(&Utc::now());
/// assert!(stamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// UTC with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// UTC with microseconds: `2025-01-08T10:30:45.123456Z`
    ///
    /// Provides higher precision for ordering concurrent log entries.
    Iso8601Micros,

    /// Local time with milliseconds and offset: `2025-01-08T19:30:45.123+0900`
    Iso8601Local,

    /// RFC 3339 with numeric offset: `2025-01-08T10:30:45.123+00:00`
    Rfc3339,
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Iso8601Local => datetime
                .with_timezone(&Local)
                .format("%Y-%m-%dT%H:%M:%S%.3f%z")
                .to_string(),
            TimestampFormat::Rfc3339 => {
                datetime.to_rfc3339_opts(chrono::SecondsFormat::Millis, false)
            }
        }
    }

    /// Get a description of this format
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            TimestampFormat::Iso8601 => "ISO 8601 UTC with milliseconds (2025-01-08T10:30:45.123Z)",
            TimestampFormat::Iso8601Micros => {
                "ISO 8601 UTC with microseconds (2025-01-08T10:30:45.123456Z)"
            }
            TimestampFormat::Iso8601Local => {
                "ISO 8601 local time with offset (2025-01-08T19:30:45.123+0900)"
            }
            TimestampFormat::Rfc3339 => "RFC 3339 with offset (2025-01-08T10:30:45.123+00:00)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_iso8601_format() {
        let result = TimestampFormat::Iso8601.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_iso8601_micros_format() {
        let result = TimestampFormat::Iso8601Micros.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123456Z");
    }

    #[test]
    fn test_rfc3339_format() {
        let result = TimestampFormat::Rfc3339.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123+00:00");
    }

    #[test]
    fn test_local_format_has_offset() {
        let result = TimestampFormat::Iso8601Local.format(&fixed_datetime());
        let offset = &result[result.len() - 5..];
        assert!(offset.starts_with('+') || offset.starts_with('-'));
        assert!(result.contains('T'));
    }

    #[test]
    fn test_default_is_iso8601() {
        assert_eq!(TimestampFormat::default(), TimestampFormat::Iso8601);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&TimestampFormat::Iso8601).expect("serialize");
        assert_eq!(json, "\"Iso8601\"");

        let format: TimestampFormat =
            serde_json::from_str("\"Iso8601Micros\"").expect("deserialize");
        assert_eq!(format, TimestampFormat::Iso8601Micros);
    }
}
