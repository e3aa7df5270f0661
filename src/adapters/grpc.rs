//! Logger for RPC framework internals
//!
//! The framework's logging interface has three shapes per level (plain,
//! line, formatted) plus a verbosity check. All three shapes take
//! `format_args!` here and produce the same record. Verbosity is read once
//! from [`VERBOSITY_ENV`] and is independent of the sink gates.

use super::forward;
use crate::core::handle::LogHandle;
use crate::core::LogLevel;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Environment variable holding the verbosity threshold
pub const VERBOSITY_ENV: &str = "GRPC_GO_LOG_VERBOSITY_LEVEL";

static GLOBAL: RwLock<Option<Arc<GrpcLogger>>> = parking_lot::const_rwlock(None);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpcConfig {
    /// Silence every call
    pub noop: bool,
}

/// Logging interface expected by the RPC framework
pub trait RpcLogger: Send + Sync {
    fn info(&self, args: fmt::Arguments<'_>);
    fn infoln(&self, args: fmt::Arguments<'_>);
    fn infof(&self, args: fmt::Arguments<'_>);
    fn warning(&self, args: fmt::Arguments<'_>);
    fn warningln(&self, args: fmt::Arguments<'_>);
    fn warningf(&self, args: fmt::Arguments<'_>);
    fn error(&self, args: fmt::Arguments<'_>);
    fn errorln(&self, args: fmt::Arguments<'_>);
    fn errorf(&self, args: fmt::Arguments<'_>);
    /// Logs at fatal level, which runs the target logger's fatal action
    fn fatal(&self, args: fmt::Arguments<'_>);
    fn fatalln(&self, args: fmt::Arguments<'_>);
    fn fatalf(&self, args: fmt::Arguments<'_>);
    /// Whether verbosity `level` is enabled
    fn v(&self, level: i32) -> bool;
}

/// # Example
///
/// ```
/// use zapper::adapters::{GrpcConfig, GrpcLogger};
///
/// let logger = GrpcLogger::new(&GrpcConfig::default()).with_verbosity(2);
/// logger.infof(format_args!("subchannel {} ready", 3));
///
/// assert!(logger.v(2));
/// assert!(!logger.v(3));
/// ```
#[derive(Debug, Clone)]
pub struct GrpcLogger {
    noop: bool,
    verbosity: i32,
    target: Option<LogHandle>,
}

impl GrpcLogger {
    /// Create a shim, reading verbosity from the environment
    pub fn new(config: &GrpcConfig) -> Self {
        let verbosity = verbosity_from_env_value(std::env::var(VERBOSITY_ENV).ok().as_deref());
        Self {
            noop: config.noop,
            verbosity,
            target: None,
        }
    }

    #[must_use]
    pub fn with_verbosity(mut self, verbosity: i32) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Send records to `handle` instead of the global registry
    #[must_use]
    pub fn bind(mut self, handle: LogHandle) -> Self {
        self.target = Some(handle);
        self
    }

    pub fn verbosity(&self) -> i32 {
        self.verbosity
    }

    pub fn is_noop(&self) -> bool {
        self.noop
    }

    pub fn v(&self, level: i32) -> bool {
        level <= self.verbosity
    }

    #[track_caller]
    fn forward(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if self.noop {
            return;
        }
        forward(self.target.as_ref(), level, args, Location::caller().into());
    }
}

macro_rules! rpc_leveled {
    ($($level:ident => $plain:ident, $ln:ident, $f:ident;)+) => {
        impl GrpcLogger {
            $(
                #[track_caller]
                pub fn $plain(&self, args: fmt::Arguments<'_>) {
                    self.forward(LogLevel::$level, args);
                }

                #[track_caller]
                pub fn $ln(&self, args: fmt::Arguments<'_>) {
                    self.forward(LogLevel::$level, args);
                }

                #[track_caller]
                pub fn $f(&self, args: fmt::Arguments<'_>) {
                    self.forward(LogLevel::$level, args);
                }
            )+
        }

        impl RpcLogger for GrpcLogger {
            $(
                #[track_caller]
                fn $plain(&self, args: fmt::Arguments<'_>) {
                    GrpcLogger::$plain(self, args);
                }

                #[track_caller]
                fn $ln(&self, args: fmt::Arguments<'_>) {
                    GrpcLogger::$ln(self, args);
                }

                #[track_caller]
                fn $f(&self, args: fmt::Arguments<'_>) {
                    GrpcLogger::$f(self, args);
                }
            )+

            fn v(&self, level: i32) -> bool {
                GrpcLogger::v(self, level)
            }
        }
    };
}

rpc_leveled! {
    Info => info, infoln, infof;
    Warn => warning, warningln, warningf;
    Error => error, errorln, errorf;
    Fatal => fatal, fatalln, fatalf;
}

/// Parse the verbosity variable; absent or unparsable means 0
pub fn verbosity_from_env_value(value: Option<&str>) -> i32 {
    value
        .and_then(|v| v.trim().parse::<i32>().ok())
        .unwrap_or(0)
}

/// Create the process-wide shim and publish it
pub fn init_global(config: &GrpcConfig) -> Arc<GrpcLogger> {
    let logger = Arc::new(GrpcLogger::new(config));
    *GLOBAL.write() = Some(Arc::clone(&logger));
    logger
}

/// The process-wide shim, if [`init_global`] has run
pub fn global() -> Option<Arc<GrpcLogger>> {
    GLOBAL.read().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Caller, Log, LogContext};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recording {
        records: Mutex<Vec<(LogLevel, String, Caller)>>,
    }

    impl Log for Recording {
        fn enabled(&self, _level: LogLevel) -> bool {
            true
        }

        fn emit(&self, level: LogLevel, message: String, _context: LogContext, caller: Caller) {
            self.records.lock().push((level, message, caller));
        }
    }

    fn bound(config: &GrpcConfig) -> (GrpcLogger, Arc<Recording>) {
        let recording = Arc::new(Recording::default());
        let logger = GrpcLogger::new(config).bind(LogHandle::from(Arc::clone(&recording)));
        (logger, recording)
    }

    #[test]
    fn test_verbosity_parsing() {
        assert_eq!(verbosity_from_env_value(None), 0);
        assert_eq!(verbosity_from_env_value(Some("")), 0);
        assert_eq!(verbosity_from_env_value(Some("verbose")), 0);
        assert_eq!(verbosity_from_env_value(Some("2")), 2);
        assert_eq!(verbosity_from_env_value(Some(" -1 ")), -1);
    }

    #[test]
    fn test_v_compares_against_verbosity() {
        let logger = GrpcLogger::new(&GrpcConfig::default()).with_verbosity(1);
        assert!(logger.v(0));
        assert!(logger.v(1));
        assert!(!logger.v(2));
    }

    #[test]
    fn test_levels_map_to_severities() {
        let (logger, recording) = bound(&GrpcConfig::default());

        logger.info(format_args!("a"));
        logger.warningln(format_args!("b"));
        logger.errorf(format_args!("c{}", 1));

        let records = recording.records.lock();
        let levels: Vec<LogLevel> = records.iter().map(|r| r.0).collect();
        assert_eq!(levels, vec![LogLevel::Info, LogLevel::Warn, LogLevel::Error]);
        assert_eq!(records[2].1, "c1");
    }

    #[test]
    fn test_noop_silences_everything() {
        let (logger, recording) = bound(&GrpcConfig { noop: true });

        logger.info(format_args!("a"));
        logger.fatalf(format_args!("not delivered"));

        assert!(recording.records.lock().is_empty());
    }

    #[test]
    fn test_trait_object_forwards_with_call_site() {
        let (logger, recording) = bound(&GrpcConfig::default());
        let rpc: &dyn RpcLogger = &logger;

        rpc.warning(format_args!("through trait"));

        let records = recording.records.lock();
        assert_eq!(records[0].1, "through trait");
        assert!(records[0].2.file.ends_with("grpc.rs"));
    }
}
