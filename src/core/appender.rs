//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// One output destination
///
/// An appender owns its encoder and write target. The dispatcher serializes
/// calls per appender, so implementations need no locking of their own, and
/// every `append` must emit one whole record or nothing.
pub trait Appender: Send {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
