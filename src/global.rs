//! Process-wide logger registry
//!
//! Holds at most one logger. Publishing replaces whatever was there (last
//! writer wins); reading before anything is published yields a no-op handle.
//! The free functions resolve the current logger on every call, so code that
//! logs through them always reaches the most recently published instance.
//!
//! # Example
//!
//! ```
//! use zapper::{field, global, LoggerConfig};
//!
//! global::info("dropped, nothing published yet", &[]);
//!
//! global::init(&LoggerConfig::console("warn")).unwrap();
//! global::warn("queue is backing up", &[field::int("depth", 512)]);
//! global::clear();
//! ```

use crate::config::LoggerConfig;
use crate::core::handle::{emit_args, emit_fields, Log, LogHandle};
use crate::core::{Field, LogLevel, Logger, Result};
use parking_lot::RwLock;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

static GLOBAL: RwLock<Option<Arc<dyn Log>>> = parking_lot::const_rwlock(None);

/// Build a logger from `config` and publish it
///
/// # Errors
///
/// Returns the construction error; the registry is left unchanged.
pub fn init(config: &LoggerConfig) -> Result<LogHandle> {
    let logger = Logger::from_config(config)?;
    Ok(set(logger))
}

/// Publish an already built logger
pub fn set<L: Log + 'static>(logger: L) -> LogHandle {
    let handle = LogHandle::new(logger);
    publish(handle.clone());
    handle
}

/// Publish the logger behind an existing handle
pub fn publish(handle: LogHandle) {
    let previous = GLOBAL.write().replace(Arc::clone(handle.as_arc()));
    // The old logger may flush on drop; do that outside the lock
    drop(previous);
}

/// Current logger, or a no-op handle when none is published
pub fn get() -> LogHandle {
    try_get().unwrap_or_default()
}

/// Current logger, or `None` when none is published
pub fn try_get() -> Option<LogHandle> {
    GLOBAL.read().as_ref().map(|log| LogHandle::from_arc(Arc::clone(log)))
}

pub fn is_initialized() -> bool {
    GLOBAL.read().is_some()
}

/// Unset the registry; later calls are no-ops until the next publish
pub fn clear() {
    let previous = GLOBAL.write().take();
    drop(previous);
}

fn current() -> Option<Arc<dyn Log>> {
    GLOBAL.read().clone()
}

macro_rules! global_leveled {
    ($($level:ident => $fields_fn:ident, $fmt_fn:ident;)+) => {
        $(
            #[doc = concat!("Log at ", stringify!($level), " level through the published logger")]
            #[track_caller]
            pub fn $fields_fn(message: impl Into<String>, fields: &[Field]) {
                if let Some(log) = current() {
                    emit_fields(&*log, LogLevel::$level, message.into(), fields, Location::caller().into());
                }
            }

            #[doc = concat!("Log a `format_args!` message at ", stringify!($level), " level through the published logger")]
            #[track_caller]
            pub fn $fmt_fn(args: fmt::Arguments<'_>) {
                if let Some(log) = current() {
                    emit_args(&*log, LogLevel::$level, args, Location::caller().into());
                }
            }
        )+
    };
}

global_leveled! {
    Debug => debug, debugf;
    Info => info, infof;
    Warn => warn, warnf;
    Error => error, errorf;
    Fatal => fatal, fatalf;
}
