//! Log entry structure

use super::log_context::LogContext;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;

/// Call-site location of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub file: &'static str,
    pub line: u32,
}

impl Caller {
    pub fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Trimmed to the last directory and file name: `core/logger.rs:42`
    pub fn short(&self) -> String {
        let mut parts = self.file.rsplit(['/', '\\']);
        let file = parts.next().unwrap_or(self.file);
        match parts.next() {
            Some(dir) if !dir.is_empty() => format!("{}/{}:{}", dir, file, self.line),
            _ => format!("{}:{}", file, self.line),
        }
    }
}

impl From<&'static Location<'static>> for Caller {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short())
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub logger: String,
    pub caller: Option<Caller>,
    pub context: Option<LogContext>,
    pub stacktrace: Option<String>,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: String) -> Self {
        Self {
            level,
            message: Self::sanitize_message(&message),
            timestamp: Utc::now(),
            logger: String::new(),
            caller: None,
            context: None,
            stacktrace: None,
        }
    }

    pub fn with_logger(mut self, name: impl Into<String>) -> Self {
        self.logger = name.into();
        self
    }

    pub fn with_caller(mut self, caller: impl Into<Caller>) -> Self {
        self.caller = Some(caller.into());
        self
    }

    /// Attach structured fields; an empty context is dropped
    pub fn with_context(mut self, context: LogContext) -> Self {
        if !context.is_empty() {
            self.context = Some(context);
        }
        self
    }

    pub fn with_stacktrace(mut self, stacktrace: impl Into<String>) -> Self {
        self.stacktrace = Some(stacktrace.into());
        self
    }

    /// Capture the current thread's stack when the level calls for one
    pub fn capture_stacktrace(self) -> Self {
        if !self.level.captures_stacktrace() {
            return self;
        }
        let trace = Backtrace::force_capture().to_string();
        // Unsupported platforms render an empty trace.
        let trace = if trace.trim().is_empty() {
            "<stack trace unavailable>".to_string()
        } else {
            trace
        };
        self.with_stacktrace(trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_caller() {
        assert_eq!(
            Caller::new("src/core/logger.rs", 42).short(),
            "core/logger.rs:42"
        );
        assert_eq!(Caller::new("main.rs", 7).short(), "main.rs:7");
        assert_eq!(
            Caller::new("C:\\work\\src\\lib.rs", 3).short(),
            "src/lib.rs:3"
        );
    }

    #[test]
    fn test_caller_from_location() {
        let caller = Caller::from(Location::caller());
        assert!(caller.file.ends_with("log_entry.rs"));
        assert!(caller.line > 0);
    }

    #[test]
    fn test_message_sanitized() {
        let entry = LogEntry::new(LogLevel::Info, "a\nb\tc".to_string());
        assert_eq!(entry.message, "a\\nb\\tc");
    }

    #[test]
    fn test_stacktrace_only_for_error_and_above() {
        let warn = LogEntry::new(LogLevel::Warn, "w".into()).capture_stacktrace();
        assert!(warn.stacktrace.is_none());

        let error = LogEntry::new(LogLevel::Error, "e".into()).capture_stacktrace();
        assert!(!error.stacktrace.unwrap_or_default().is_empty());
    }

    #[test]
    fn test_empty_context_dropped() {
        let entry = LogEntry::new(LogLevel::Info, "m".into()).with_context(LogContext::new());
        assert!(entry.context.is_none());
    }
}
