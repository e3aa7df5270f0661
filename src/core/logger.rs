//! Main logger implementation
//!
//! A [`Logger`] owns a fixed, ordered list of sinks. Each sink pairs an
//! [`Appender`] with its own [`LevelGate`]; one logging call is encoded and
//! written once per sink whose gate accepts the record, in construction
//! order (console, then file, then any extra appenders).

use super::{
    appender::Appender,
    encoder::{Encoder, Encoding},
    error::Result,
    handle::Log,
    level_gate::LevelGate,
    log_context::LogContext,
    log_entry::{Caller, LogEntry},
    log_level::LogLevel,
    metrics::LoggerMetrics,
};
use crate::appenders::{ConsoleAppender, RotatingFileAppender, RotationPolicy};
use crate::config::LoggerConfig;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Action run after a fatal record has been delivered
pub type FatalHook = Arc<dyn Fn() + Send + Sync>;

/// Default logger name when none is configured
pub const DEFAULT_LOGGER_NAME: &str = "root";

fn exit_process() -> FatalHook {
    Arc::new(|| std::process::exit(1))
}

struct Sink {
    name: String,
    gate: LevelGate,
    appender: Mutex<Box<dyn Appender>>,
}

impl Sink {
    fn new(gate: LevelGate, appender: Box<dyn Appender>) -> Self {
        Self {
            name: appender.name().to_string(),
            gate,
            appender: Mutex::new(appender),
        }
    }
}

/// Dispatcher that fans each record out to its gated sinks
pub struct Logger {
    name: String,
    sinks: Vec<Sink>,
    console_level: LevelGate,
    file_level: LevelGate,
    metrics: LoggerMetrics,
    on_fatal: FatalHook,
}

impl Logger {
    /// Build a logger from configuration
    ///
    /// Unknown level or format strings fall back to `info` and text. Fails
    /// only when the file destination cannot be created or opened.
    ///
    /// # Example
    ///
    /// ```
    /// use zapper::{Logger, LoggerConfig};
    ///
    /// let logger = Logger::from_config(&LoggerConfig {
    ///     enable_console: true,
    ///     console_level: "warn".into(),
    ///     ..LoggerConfig::default()
    /// })
    /// .unwrap();
    ///
    /// logger.info("filtered out", &[]);
    /// ```
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        LoggerBuilder::from_config(config).build()
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gate of the console sink; adjustable whether or not the sink is enabled
    pub fn console_level(&self) -> &LevelGate {
        &self.console_level
    }

    /// Gate of the file sink; adjustable whether or not the sink is enabled
    pub fn file_level(&self) -> &LevelGate {
        &self.file_level
    }

    pub fn set_console_level(&self, level: LogLevel) {
        self.console_level.set_level(level);
    }

    pub fn set_file_level(&self, level: LogLevel) {
        self.file_level.set_level(level);
    }

    /// Names of the active sinks, in dispatch order
    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|s| s.name.as_str()).collect()
    }

    /// Whether any sink currently accepts `level`
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.sinks.iter().any(|s| s.gate.enabled(level))
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    impl_leveled_methods!();

    fn dispatch(&self, level: LogLevel, message: String, context: LogContext, caller: Caller) {
        let accepting: Vec<&Sink> = self.sinks.iter().filter(|s| s.gate.enabled(level)).collect();

        if !accepting.is_empty() {
            let entry = LogEntry::new(level, message)
                .with_logger(self.name.clone())
                .with_caller(caller)
                .with_context(context)
                .capture_stacktrace();

            for sink in accepting {
                self.write_to(sink, &entry);
            }
        }

        if level == LogLevel::Fatal {
            self.flush_all();
            (self.on_fatal)();
        }
    }

    /// Write one entry with per-sink panic isolation
    ///
    /// Errors and panics are reported on stderr and counted, never propagated.
    fn write_to(&self, sink: &Sink, entry: &LogEntry) {
        let mut appender = sink.appender.lock();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            appender.append(entry)
        }));

        match result {
            Ok(Ok(())) => {
                self.metrics.record_written();
            }
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Sink '{}' failed: {}", sink.name, e);
                self.metrics.record_failed();
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                eprintln!(
                    "[LOGGER CRITICAL] Sink '{}' panicked: {}. \
                     Other sinks continue to function.",
                    sink.name, panic_msg
                );
                self.metrics.record_failed();
            }
        }
    }

    /// Flush every sink, returning the first error
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(e) = sink.appender.lock().flush() {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn flush_all(&self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush: {}", e);
        }
    }
}

impl Log for Logger {
    fn enabled(&self, level: LogLevel) -> bool {
        Logger::enabled(self, level)
    }

    fn emit(&self, level: LogLevel, message: String, context: LogContext, caller: Caller) {
        self.dispatch(level, message, context, caller);
    }

    fn flush(&self) {
        self.flush_all();
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.flush_all();
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use zapper::prelude::*;
/// use std::sync::Arc;
///
/// let config = LoggerConfig {
///     enable_console: true,
///     console_level: "debug".into(),
///     console_format: "json".into(),
///     ..LoggerConfig::default()
/// };
///
/// let audit = LevelGate::new(LogLevel::Warn);
/// let logger = Logger::builder()
///     .config(config)
///     .name("api")
///     .console_target(std::io::sink())
///     .appender(audit.clone(), ConsoleAppender::with_target(std::io::sink()))
///     .on_fatal(Arc::new(|| eprintln!("fatal record written")))
///     .build()
///     .unwrap();
///
/// assert_eq!(logger.sink_names(), vec!["console", "console"]);
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    console_target: Option<Box<dyn Write + Send>>,
    extra: Vec<(LevelGate, Box<dyn Appender>)>,
    on_fatal: Option<FatalHook>,
}

impl LoggerBuilder {
    /// Create a new builder with default values (no sinks enabled)
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            console_target: None,
            extra: Vec::new(),
            on_fatal: None,
        }
    }

    pub fn from_config(config: &LoggerConfig) -> Self {
        Self::new().config(config.clone())
    }

    /// Replace the whole configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the value of the `logger` key
    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Write console records somewhere other than stdout
    #[must_use = "builder methods return a new value"]
    pub fn console_target<W: Write + Send + 'static>(mut self, target: W) -> Self {
        self.console_target = Some(Box::new(target));
        self
    }

    /// Add an appender after the configured sinks, filtered by `gate`
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, gate: LevelGate, appender: A) -> Self {
        self.extra.push((gate, Box::new(appender)));
        self
    }

    /// Replace the default fatal action (`std::process::exit(1)`)
    #[must_use = "builder methods return a new value"]
    pub fn on_fatal(mut self, hook: FatalHook) -> Self {
        self.on_fatal = Some(hook);
        self
    }

    /// Build the Logger
    ///
    /// # Errors
    ///
    /// Returns an error if the file sink is enabled and its path cannot be
    /// created or opened.
    pub fn build(self) -> Result<Logger> {
        let config = self.config;
        let console_level = LevelGate::new(LogLevel::from_config_str(&config.console_level));
        let file_level = LevelGate::new(LogLevel::from_config_str(&config.file_level));
        let mut sinks = Vec::new();

        if config.enable_console {
            let encoder = Encoder::new(Encoding::from_config_str(&config.console_format))
                .with_colors(config.console_color);
            let appender = match self.console_target {
                Some(target) => ConsoleAppender::with_boxed_target(target),
                None => ConsoleAppender::new(),
            }
            .with_encoder(encoder);
            sinks.push(Sink::new(console_level.clone(), Box::new(appender)));
        }

        if config.enable_file {
            let encoder = Encoder::new(Encoding::from_config_str(&config.file_format));
            let appender =
                RotatingFileAppender::with_policy(&config.file_path, RotationPolicy::from_config(&config))?
                    .with_encoder(encoder);
            sinks.push(Sink::new(file_level.clone(), Box::new(appender)));
        }

        for (gate, appender) in self.extra {
            sinks.push(Sink::new(gate, appender));
        }

        let name = if config.name.is_empty() {
            DEFAULT_LOGGER_NAME.to_string()
        } else {
            config.name
        };

        Ok(Logger {
            name,
            sinks,
            console_level,
            file_level,
            metrics: LoggerMetrics::new(),
            on_fatal: self.on_fatal.unwrap_or_else(exit_process),
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
