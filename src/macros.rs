//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. They work on
//! anything with the leveled API: [`Logger`](crate::Logger) and
//! [`LogHandle`](crate::LogHandle). Arguments are only formatted when some
//! sink accepts the level.
//!
//! # Examples
//!
//! ```
//! use zapper::prelude::*;
//! use zapper::info;
//!
//! let logger = LogHandle::nop();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use zapper::prelude::*;
/// # let logger = LogHandle::nop();
/// use zapper::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.logf($level, ::std::format_args!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use zapper::prelude::*;
/// # let logger = LogHandle::nop();
/// use zapper::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(::std::format_args!($($arg)+))
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use zapper::prelude::*;
/// # let logger = LogHandle::nop();
/// use zapper::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(::std::format_args!($($arg)+))
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use zapper::prelude::*;
/// # let logger = LogHandle::nop();
/// use zapper::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "disk at {}%", 90);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warnf(::std::format_args!($($arg)+))
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use zapper::prelude::*;
/// # let logger = LogHandle::nop();
/// use zapper::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(::std::format_args!($($arg)+))
    };
}

/// Log a fatal-level message, then run the logger's fatal action.
///
/// # Examples
///
/// ```
/// # use zapper::prelude::*;
/// # let logger = LogHandle::nop();
/// use zapper::fatal;
/// // A no-op handle never terminates the process
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(::std::format_args!($($arg)+))
    };
}
