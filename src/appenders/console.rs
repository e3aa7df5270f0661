//! Console appender implementation

use crate::core::{Appender, Encoder, LogEntry, LoggerError, Result, TimestampFormat};
use std::io::{self, Write};

/// Writes one encoded line per record to standard output
///
/// Every level goes to the same stream; the target can be swapped for any
/// [`Write`] implementation, which tests use to capture output.
pub struct ConsoleAppender {
    target: Box<dyn Write + Send>,
    encoder: Encoder,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self::with_boxed_target(Box::new(io::stdout()))
    }

    /// Write to `target` instead of stdout
    ///
    /// # Example
    ///
    /// ```
    /// use zapper::appenders::ConsoleAppender;
    /// use zapper::Encoder;
    ///
    /// let appender = ConsoleAppender::with_target(Vec::new())
    ///     .with_encoder(Encoder::json());
    /// ```
    pub fn with_target<W: Write + Send + 'static>(target: W) -> Self {
        Self::with_boxed_target(Box::new(target))
    }

    pub fn with_boxed_target(target: Box<dyn Write + Send>) -> Self {
        Self {
            target,
            encoder: Encoder::default(),
        }
    }

    #[must_use]
    pub fn with_encoder(mut self, encoder: Encoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// Color the level name with ANSI escapes (text encoding only)
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.encoder = self.encoder.with_colors(use_colors);
        self
    }

    /// Set the timestamp format for this appender
    ///
    /// # Examples
    ///
    /// ```
    /// use zapper::appenders::ConsoleAppender;
    /// use zapper::TimestampFormat;
    ///
    /// let appender = ConsoleAppender::new()
    ///     .with_timestamp_format(TimestampFormat::Iso8601Micros);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.encoder = self.encoder.with_timestamp_format(format);
        self
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let mut line = self.encoder.encode(entry);
        line.push('\n');

        // A single write_all keeps the line whole on the shared stream
        self.target
            .write_all(line.as_bytes())
            .map_err(|e| LoggerError::io_operation("write console", "Failed to write log entry", e))
    }

    fn flush(&mut self) -> Result<()> {
        self.target.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{field, LogContext, LogLevel};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_one_line_per_record() {
        let buffer = SharedBuffer::default();
        let mut appender = ConsoleAppender::with_target(buffer.clone());

        appender
            .append(&LogEntry::new(LogLevel::Info, "first".into()))
            .unwrap();
        appender
            .append(&LogEntry::new(LogLevel::Error, "second".into()))
            .unwrap();
        appender.flush().unwrap();

        let output = buffer.contents();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("level=info"));
        assert!(lines[1].contains("level=error"));
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_json_encoder() {
        let buffer = SharedBuffer::default();
        let mut appender =
            ConsoleAppender::with_target(buffer.clone()).with_encoder(Encoder::json());

        let entry = LogEntry::new(LogLevel::Warn, "slow".into())
            .with_context(LogContext::from(&[field::int("ms", 1200)][..]));
        appender.append(&entry).unwrap();

        let value: serde_json::Value = serde_json::from_str(buffer.contents().trim()).unwrap();
        assert_eq!(value["level"], "warn");
        assert_eq!(value["msg"], "slow");
        assert_eq!(value["ms"], 1200);
    }

    #[test]
    fn test_console_appender_name() {
        let appender = ConsoleAppender::with_target(io::sink());
        assert_eq!(appender.name(), "console");
    }
}
