//! Runtime-adjustable severity threshold shared between a sink and its owner

use super::log_level::LogLevel;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Minimum severity a single sink currently accepts
///
/// Clones share the same threshold, so a handle obtained from
/// [`Logger::console_level`](crate::Logger::console_level) can raise or lower
/// verbosity while the logger keeps dispatching.
///
/// # Example
///
/// ```
/// use zapper::{LevelGate, LogLevel};
///
/// let gate = LevelGate::new(LogLevel::Warn);
/// assert!(!gate.enabled(LogLevel::Info));
///
/// let handle = gate.clone();
/// handle.set_level(LogLevel::Debug);
/// assert!(gate.enabled(LogLevel::Info));
/// ```
#[derive(Clone)]
pub struct LevelGate {
    level: Arc<AtomicU8>,
}

impl LevelGate {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level: Arc::new(AtomicU8::new(level as u8)),
        }
    }

    #[inline]
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::SeqCst))
    }

    #[inline]
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    /// Whether a record at `level` passes this gate
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }
}

impl Default for LevelGate {
    fn default() -> Self {
        Self::new(LogLevel::default())
    }
}

impl fmt::Debug for LevelGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LevelGate").field(&self.level()).finish()
    }
}
