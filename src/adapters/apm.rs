//! Logger for the APM agent
//!
//! The agent only reports debug and error messages.

use super::forward;
use crate::core::handle::LogHandle;
use crate::core::LogLevel;
use std::fmt;
use std::panic::Location;

static GLOBAL: ApmLogger = ApmLogger::new();

/// Logging interface expected by the APM agent
pub trait ApmLog: Send + Sync {
    fn debugf(&self, args: fmt::Arguments<'_>);
    fn errorf(&self, args: fmt::Arguments<'_>);
}

#[derive(Debug, Clone, Default)]
pub struct ApmLogger {
    target: Option<LogHandle>,
}

impl ApmLogger {
    /// Shim forwarding to the global registry
    pub const fn new() -> Self {
        Self { target: None }
    }

    /// Shim forwarding to `handle`
    pub fn bind(handle: LogHandle) -> Self {
        Self {
            target: Some(handle),
        }
    }

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        forward(self.target.as_ref(), LogLevel::Debug, args, Location::caller().into());
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        forward(self.target.as_ref(), LogLevel::Error, args, Location::caller().into());
    }
}

impl ApmLog for ApmLogger {
    #[track_caller]
    fn debugf(&self, args: fmt::Arguments<'_>) {
        ApmLogger::debugf(self, args);
    }

    #[track_caller]
    fn errorf(&self, args: fmt::Arguments<'_>) {
        ApmLogger::errorf(self, args);
    }
}

/// The process-wide shim; always available
pub fn global() -> &'static ApmLogger {
    &GLOBAL
}
