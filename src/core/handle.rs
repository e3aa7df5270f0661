//! The logging capability consumed by call sites and adapter shims
//!
//! [`Log`] is the narrow interface: an enabled check and a single emit
//! operation. [`Logger`](crate::Logger) is the real implementation,
//! [`NopLogger`] stands in where nothing is configured, and [`LogHandle`] is
//! the cheap, cloneable reference that carries the leveled API.

use super::log_context::{Field, LogContext};
use super::log_entry::Caller;
use super::log_level::LogLevel;
use std::fmt;
use std::sync::Arc;

pub trait Log: Send + Sync {
    /// Whether any destination would accept a record at `level`
    fn enabled(&self, level: LogLevel) -> bool;

    /// Deliver one record; fatal records end with the implementation's fatal action
    fn emit(&self, level: LogLevel, message: String, context: LogContext, caller: Caller);

    fn flush(&self) {}
}

/// Accepts every call and does nothing, including on fatal records
#[derive(Debug, Clone, Copy, Default)]
pub struct NopLogger;

impl Log for NopLogger {
    fn enabled(&self, _level: LogLevel) -> bool {
        false
    }

    fn emit(&self, _level: LogLevel, _message: String, _context: LogContext, _caller: Caller) {}
}

/// Shared reference to a [`Log`] implementation
///
/// # Example
///
/// ```
/// use zapper::{field, LogHandle};
///
/// let handle = LogHandle::nop();
/// handle.info("never written", &[field::int("attempt", 1)]);
/// handle.warnf(format_args!("disk at {}%", 90));
/// ```
#[derive(Clone)]
pub struct LogHandle {
    inner: Arc<dyn Log>,
}

impl LogHandle {
    pub fn new<L: Log + 'static>(log: L) -> Self {
        Self {
            inner: Arc::new(log),
        }
    }

    pub fn from_arc(inner: Arc<dyn Log>) -> Self {
        Self { inner }
    }

    pub fn nop() -> Self {
        Self::new(NopLogger)
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        self.inner.enabled(level)
    }

    pub fn flush(&self) {
        self.inner.flush();
    }

    /// Whether both handles point at the same logger instance
    pub fn same_logger(&self, other: &LogHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn as_arc(&self) -> &Arc<dyn Log> {
        &self.inner
    }

    impl_leveled_methods!();
}

impl Log for LogHandle {
    fn enabled(&self, level: LogLevel) -> bool {
        self.inner.enabled(level)
    }

    fn emit(&self, level: LogLevel, message: String, context: LogContext, caller: Caller) {
        self.inner.emit(level, message, context, caller);
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

impl Default for LogHandle {
    fn default() -> Self {
        Self::nop()
    }
}

impl fmt::Debug for LogHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogHandle").finish_non_exhaustive()
    }
}

impl<L: Log + 'static> From<Arc<L>> for LogHandle {
    fn from(log: Arc<L>) -> Self {
        Self { inner: log }
    }
}

/// Fatal records always reach `emit` so the fatal action runs even when every
/// sink rejects them.
pub(crate) fn emit_fields(
    log: &dyn Log,
    level: LogLevel,
    message: String,
    fields: &[Field],
    caller: Caller,
) {
    if level == LogLevel::Fatal || log.enabled(level) {
        log.emit(level, message, LogContext::from(fields), caller);
    }
}

pub(crate) fn emit_args(log: &dyn Log, level: LogLevel, args: fmt::Arguments<'_>, caller: Caller) {
    if level == LogLevel::Fatal || log.enabled(level) {
        let message = match args.as_str() {
            Some(s) => s.to_string(),
            None => args.to_string(),
        };
        log.emit(level, message, LogContext::new(), caller);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recording {
        threshold: Option<LogLevel>,
        records: Mutex<Vec<(LogLevel, String, LogContext, Caller)>>,
    }

    impl Log for Recording {
        fn enabled(&self, level: LogLevel) -> bool {
            self.threshold.is_some_and(|t| level >= t)
        }

        fn emit(&self, level: LogLevel, message: String, context: LogContext, caller: Caller) {
            self.records.lock().push((level, message, context, caller));
        }
    }

    #[test]
    fn test_nop_handle_accepts_everything() {
        let handle = LogHandle::nop();
        handle.debug("d", &[]);
        handle.errorf(format_args!("code {}", 500));
        handle.fatal("not terminating", &[]);
        assert!(!handle.enabled(LogLevel::Fatal));
    }

    #[test]
    fn test_formatting_skipped_below_threshold() {
        let recording = Arc::new(Recording {
            threshold: Some(LogLevel::Warn),
            ..Default::default()
        });
        let handle = LogHandle::from(Arc::clone(&recording));

        handle.infof(format_args!("hidden {}", 1));
        handle.warnf(format_args!("disk at {}%", 90));
        handle.error("failed", &[field::string("op", "write")]);

        let records = recording.records.lock();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].1, "disk at 90%");
        assert_eq!(
            records[1].2.get("op"),
            Some(&crate::core::FieldValue::String("write".into()))
        );
    }

    #[test]
    fn test_fatal_bypasses_enabled_check() {
        let recording = Arc::new(Recording::default());
        let handle = LogHandle::from(Arc::clone(&recording));

        handle.warn("dropped", &[]);
        handle.fatal("delivered", &[]);

        let records = recording.records.lock();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, LogLevel::Fatal);
    }

    #[test]
    fn test_caller_is_call_site() {
        let recording = Arc::new(Recording {
            threshold: Some(LogLevel::Debug),
            ..Default::default()
        });
        let handle = LogHandle::from(Arc::clone(&recording));

        let line = line!() + 1;
        handle.debug("here", &[]);

        let records = recording.records.lock();
        assert!(records[0].3.file.ends_with("handle.rs"));
        assert_eq!(records[0].3.line, line);
    }

    #[test]
    fn test_same_logger() {
        let a = LogHandle::nop();
        let b = a.clone();
        assert!(a.same_logger(&b));
        assert!(!a.same_logger(&LogHandle::nop()));
    }
}
