//! # Zapper
//!
//! A structured logging facade with leveled, multi-destination output.
//!
//! ## Features
//!
//! - **Leveled API**: debug, info, warn, error and fatal, each with a
//!   structured-fields shape and a `format_args!` shape
//! - **Independent sinks**: console and size-rotated file output, each with
//!   its own runtime-adjustable minimum level and text or JSON encoding
//! - **Fixed record keys**: `timestamp`, `level`, `logger`, `caller`, `msg`,
//!   and `stacktrace` for error and fatal records
//! - **Global registry**: publish one logger for the whole process; calls made
//!   before anything is published are no-ops
//! - **Adapters**: shims for RPC framework and APM agent logging interfaces
//!
//! ## Example
//!
//! ```
//! use zapper::prelude::*;
//!
//! let logger = Logger::from_config(&LoggerConfig {
//!     enable_console: true,
//!     console_level: "warn".into(),
//!     ..LoggerConfig::default()
//! })
//! .unwrap();
//!
//! logger.info("not written", &[]);
//! logger.warn("disk filling up", &[field::int("percent", 90)]);
//! logger.warnf(format_args!("disk at {}%", 90));
//! ```

pub mod adapters;
pub mod appenders;
pub mod config;
pub mod core;
pub mod global;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, RotatingFileAppender, RotationPolicy};
    pub use crate::config::LoggerConfig;
    pub use crate::core::{
        field, Appender, Caller, Encoder, Encoding, FatalHook, Field, FieldValue, LevelGate, Log,
        LogContext, LogEntry, LogHandle, LogLevel, Logger, LoggerBuilder, LoggerError,
        LoggerMetrics, NopLogger, Result, TimestampFormat,
    };
}

pub use appenders::{ConsoleAppender, RotatingFileAppender, RotationPolicy};
pub use config::LoggerConfig;
pub use self::core::{
    field, Appender, Caller, Encoder, Encoding, FatalHook, Field, FieldValue, LevelGate, Log,
    LogContext, LogEntry, LogHandle, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics,
    NopLogger, Result, TimestampFormat,
};
