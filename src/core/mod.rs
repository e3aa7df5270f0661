//! Core logger types and traits

#[macro_use]
mod leveled;

pub mod appender;
pub mod encoder;
pub mod error;
pub mod handle;
pub mod level_gate;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod timestamp;

pub use appender::Appender;
pub use encoder::{Encoder, Encoding};
pub use error::{LoggerError, Result};
pub use handle::{Log, LogHandle, NopLogger};
pub use level_gate::LevelGate;
pub use log_context::{field, Field, FieldValue, LogContext};
pub use log_entry::{Caller, LogEntry};
pub use log_level::LogLevel;
pub use logger::{FatalHook, Logger, LoggerBuilder, DEFAULT_LOGGER_NAME};
pub use metrics::LoggerMetrics;
pub use timestamp::TimestampFormat;
