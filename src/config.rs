//! Logger configuration
//!
//! Every field has a default, so a partial document deserializes cleanly.
//! Level and format values are kept as strings and parsed leniently when the
//! logger is built: an unknown level becomes `info`, an unknown format
//! becomes text.

use serde::{Deserialize, Serialize};

/// Settings for [`Logger::from_config`](crate::Logger::from_config)
///
/// # Example
///
/// ```
/// use zapper::LoggerConfig;
///
/// let config: LoggerConfig = serde_json::from_str(
///     r#"{"enable_file": true, "file_path": "/var/log/api.log", "file_format": "json"}"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.file_level, "info");
/// assert!(!config.enable_console);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Value of the `logger` key
    pub name: String,

    pub enable_console: bool,
    pub console_level: String,
    /// `text` or `json`
    pub console_format: String,
    /// Color the level name in text console output
    pub console_color: bool,

    pub enable_file: bool,
    pub file_level: String,
    /// `text` or `json`
    pub file_format: String,
    pub file_path: String,
    /// Megabytes before rotation; 0 selects 100
    pub file_max_size: u64,
    /// Days to keep backups; 0 keeps them regardless of age
    pub file_max_age: u64,
    /// Backups to keep; 0 keeps all
    pub file_max_backups: usize,
    /// Name backups after local time instead of UTC
    pub file_local_time: bool,
    /// Gzip rotated backups
    pub file_compress: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: crate::core::DEFAULT_LOGGER_NAME.to_string(),
            enable_console: false,
            console_level: "info".to_string(),
            console_format: "text".to_string(),
            console_color: false,
            enable_file: false,
            file_level: "info".to_string(),
            file_format: "text".to_string(),
            file_path: "app.log".to_string(),
            file_max_size: 0,
            file_max_age: 0,
            file_max_backups: 0,
            file_local_time: false,
            file_compress: false,
        }
    }
}

impl LoggerConfig {
    /// Console-only configuration at `level`
    pub fn console(level: impl Into<String>) -> Self {
        Self {
            enable_console: true,
            console_level: level.into(),
            ..Self::default()
        }
    }

    /// File-only configuration writing to `path` at `level`
    pub fn file(path: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            enable_file: true,
            file_path: path.into(),
            file_level: level.into(),
            ..Self::default()
        }
    }
}
