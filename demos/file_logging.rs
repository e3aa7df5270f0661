//! File logging example
//!
//! Demonstrates logging to console and a rotating file at different levels.
//!
//! Run with: cargo run --example file_logging

use zapper::prelude::*;

fn main() -> Result<()> {
    println!("=== Zapper - File Logging Example ===\n");

    let logger = Logger::from_config(&LoggerConfig {
        name: "app".into(),
        enable_console: true,
        console_level: "debug".into(),
        enable_file: true,
        file_level: "warn".into(),
        file_format: "json".into(),
        file_path: "logs/application.log".into(),
        file_max_size: 10,
        file_max_age: 7,
        file_max_backups: 5,
        file_compress: true,
        ..LoggerConfig::default()
    })?;

    println!("1. Console gets everything, the file only warnings and above:");
    logger.info("Application started", &[]);
    logger.debug("Loading configuration...", &[field::string("path", "config.toml")]);
    logger.warn("Using default settings for some options", &[]);
    logger.error("Failed to load optional plugin", &[field::string("plugin", "metrics")]);

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        logger.infof(format_args!("Processing item {}/5", i));
        if i == 3 {
            logger.warn("Item took longer than expected", &[field::int("item", i)]);
        }
    }

    logger.info("All operations completed", &[]);
    logger.flush()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check 'logs/application.log' for the warning and error records");

    Ok(())
}
