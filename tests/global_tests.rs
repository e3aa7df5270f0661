//! Tests for the process-wide registry and the adapter shims built on it
//!
//! The registry is shared by every test in this binary, so each test holds
//! `REGISTRY_LOCK` for its whole body.

use parking_lot::Mutex;
use std::fs;
use std::io::{self, Write};
use std::sync::Arc;
use tempfile::TempDir;
use zapper::adapters::{apm, grpc, GrpcConfig};
use zapper::global;
use zapper::prelude::*;

static REGISTRY_LOCK: Mutex<()> = parking_lot::const_mutex(());

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock())
            .lines()
            .map(str::to_string)
            .collect()
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

fn publish_buffer_logger(level: &str) -> SharedBuffer {
    let buffer = SharedBuffer::default();
    let logger = Logger::builder()
        .config(LoggerConfig::console(level))
        .console_target(buffer.clone())
        .on_fatal(Arc::new(|| {}))
        .build()
        .expect("Failed to build logger");
    global::set(logger);
    buffer
}

#[test]
fn test_unset_registry_is_noop() {
    let _guard = REGISTRY_LOCK.lock();
    global::clear();

    assert!(!global::is_initialized());
    assert!(global::try_get().is_none());

    // None of these may panic or terminate the process
    global::info("nobody listening", &[]);
    global::errorf(format_args!("code {}", 500));
    global::fatal("still running", &[]);
    global::get().fatalf(format_args!("still running"));

    assert!(!global::get().enabled(LogLevel::Fatal));
}

#[test]
fn test_second_init_replaces_first() {
    let _guard = REGISTRY_LOCK.lock();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let first = temp_dir.path().join("first.log");
    let second = temp_dir.path().join("second.log");

    let first_handle = global::init(&LoggerConfig::file(first.to_string_lossy(), "info"))
        .expect("Failed to init first logger");
    drop(first_handle);
    let second_handle = global::init(&LoggerConfig::file(second.to_string_lossy(), "info"))
        .expect("Failed to init second logger");

    global::info("after second init", &[]);

    assert!(global::get().same_logger(&second_handle));
    assert_eq!(fs::read_to_string(&first).unwrap(), "");
    let content = fs::read_to_string(&second).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains("msg=\"after second init\""));

    global::clear();
}

#[test]
fn test_failed_init_leaves_registry_unchanged() {
    let _guard = REGISTRY_LOCK.lock();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let buffer = publish_buffer_logger("info");

    // A directory cannot be opened as a log file
    let result = global::init(&LoggerConfig::file(temp_dir.path().to_string_lossy(), "info"));
    assert!(result.is_err());

    global::info("still routed", &[]);
    assert_eq!(buffer.lines().len(), 1);

    global::clear();
}

#[test]
fn test_free_functions_use_current_logger() {
    let _guard = REGISTRY_LOCK.lock();
    let buffer = publish_buffer_logger("info");

    global::debug("filtered", &[]);
    global::info("fields", &[field::bool("cached", true)]);
    global::warnf(format_args!("disk at {}%", 90));
    let line = line!() + 1;
    global::error("failed", &[]);

    let lines = buffer.lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("cached=true"));
    assert!(lines[1].contains("msg=\"disk at 90%\""));
    assert!(lines[2].contains(&format!("caller=tests/global_tests.rs:{}", line)));

    global::clear();
    global::info("after clear", &[]);
    assert_eq!(buffer.lines().len(), 3);
}

#[test]
fn test_grpc_shim_forwards_to_registry() {
    let _guard = REGISTRY_LOCK.lock();
    let buffer = publish_buffer_logger("info");

    std::env::set_var(grpc::VERBOSITY_ENV, "3");
    let shim = grpc::init_global(&GrpcConfig::default());
    std::env::remove_var(grpc::VERBOSITY_ENV);

    assert!(Arc::ptr_eq(&shim, &grpc::global().expect("shim published")));
    assert_eq!(shim.verbosity(), 3);
    assert!(shim.v(3));
    assert!(!shim.v(4));

    shim.infof(format_args!("resolver {} updated", "dns"));
    shim.warningln(format_args!("transport closing"));

    let lines = buffer.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("level=info") && lines[0].contains("resolver dns updated"));
    assert!(lines[1].contains("level=warn"));

    let silent = grpc::init_global(&GrpcConfig { noop: true });
    silent.error(format_args!("dropped"));
    assert_eq!(buffer.lines().len(), 2);

    global::clear();
}

#[test]
fn test_grpc_shim_reaches_logger_published_later() {
    let _guard = REGISTRY_LOCK.lock();
    global::clear();

    let shim = grpc::GrpcLogger::new(&GrpcConfig::default());
    shim.info(format_args!("before any logger"));

    let buffer = publish_buffer_logger("info");
    shim.info(format_args!("after publish"));

    let lines = buffer.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("after publish"));

    global::clear();
}

#[test]
fn test_apm_shim_forwards_to_registry() {
    let _guard = REGISTRY_LOCK.lock();
    let buffer = publish_buffer_logger("info");

    apm::global().debugf(format_args!("span {} dropped", 7));
    apm::global().errorf(format_args!("send failed: {}", "timeout"));

    let lines = buffer.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("level=error"));
    assert!(lines[0].contains("msg=\"send failed: timeout\""));

    global::clear();
}
