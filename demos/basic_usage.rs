//! Basic logger usage example
//!
//! Demonstrates console logging, the two call shapes and runtime level changes.
//!
//! Run with: cargo run --example basic_usage

use zapper::prelude::*;
use zapper::warn;

fn main() -> Result<()> {
    println!("=== Zapper - Basic Usage Example ===\n");

    let logger = Logger::from_config(&LoggerConfig {
        name: "basic".into(),
        enable_console: true,
        console_level: "debug".into(),
        console_color: true,
        ..LoggerConfig::default()
    })?;

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message", &[]);
    logger.info("This is an info message", &[field::string("version", "0.1.0")]);
    logger.warn("This is a warning message", &[field::int("retries", 3)]);
    logger.error("This is an error message", &[field::bool("recoverable", true)]);

    println!("\n2. Formatted messages:");
    logger.infof(format_args!("Listening on port {}", 8080));
    warn!(logger, "disk at {}%", 90);

    println!("\n3. Raising the console level at runtime:");
    logger.console_level().set_level(LogLevel::Warn);
    logger.debug("Debug message (hidden)", &[]);
    logger.info("Info message (hidden)", &[]);
    logger.warn("Warning message (visible)", &[]);

    println!("\n4. JSON output:");
    let json = Logger::from_config(&LoggerConfig {
        console_format: "json".into(),
        ..LoggerConfig::console("info")
    })?;
    json.info("Request processed", &[field::int("status", 200), field::float("ms", 12.5)]);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
