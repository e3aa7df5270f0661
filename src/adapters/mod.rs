//! Shims that let third-party libraries log through this crate
//!
//! Each shim exposes the method set its library expects and forwards every
//! call to the global registry, or to a [`LogHandle`](crate::LogHandle)
//! bound at construction.

pub mod apm;
pub mod grpc;

pub use apm::{ApmLog, ApmLogger};
pub use grpc::{GrpcConfig, GrpcLogger, RpcLogger};

use crate::core::handle::{emit_args, LogHandle};
use crate::core::{Caller, LogLevel};
use std::fmt;

/// Send one formatted record to `target`, or to the published logger
fn forward(target: Option<&LogHandle>, level: LogLevel, args: fmt::Arguments<'_>, caller: Caller) {
    match target {
        Some(handle) => emit_args(handle, level, args, caller),
        None => {
            if let Some(handle) = crate::global::try_get() {
                emit_args(&handle, level, args, caller);
            }
        }
    }
}
