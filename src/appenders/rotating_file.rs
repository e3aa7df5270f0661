//! Rotating file appender with automatic log rotation
//!
//! The active file keeps its configured name. When the next record would
//! push it past the size limit, the file is renamed to a timestamped backup
//! (`app.log` becomes `app-2025-01-08T10-30-45.123.log`) and a fresh file is
//! opened. Backups are then pruned by count and age, and optionally
//! gzip-compressed.

use crate::config::LoggerConfig;
use crate::core::appender::Appender;
use crate::core::encoder::Encoder;
use crate::core::error::{LoggerError, Result};
use crate::core::log_entry::LogEntry;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Size limit used when none is configured
pub const DEFAULT_MAX_SIZE_MB: u64 = 100;

const MEGABYTE: u64 = 1024 * 1024;
const SECONDS_PER_DAY: u64 = 24 * 60 * 60;
const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";
const COMPRESS_SUFFIX: &str = ".gz";

/// Configuration for rotating file appender
///
/// # Examples
///
/// ```
/// use zapper::appenders::RotationPolicy;
///
/// // Rotate at 50 MB, keep a week of at most 7 compressed backups
/// let policy = RotationPolicy::new()
///     .with_max_size_mb(50)
///     .with_max_age_days(7)
///     .with_max_backups(7)
///     .with_compression(true);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RotationPolicy {
    /// Size in bytes after which the active file is rotated
    pub max_bytes: u64,
    /// Backups older than this are deleted; `None` keeps them forever
    pub max_age: Option<Duration>,
    /// Number of backups to keep; 0 keeps all
    pub max_backups: usize,
    /// Name backups after local time instead of UTC
    pub local_time: bool,
    /// Gzip backups after rotation
    pub compress: bool,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_SIZE_MB * MEGABYTE,
            max_age: None,
            max_backups: 0,
            local_time: false,
            compress: false,
        }
    }
}

impl RotationPolicy {
    /// Create a new rotation policy with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the policy from the `file_*` settings of a logger config
    pub fn from_config(config: &LoggerConfig) -> Self {
        Self::new()
            .with_max_size_mb(config.file_max_size)
            .with_max_age_days(config.file_max_age)
            .with_max_backups(config.file_max_backups)
            .with_local_time(config.file_local_time)
            .with_compression(config.file_compress)
    }

    /// Set the maximum file size in bytes
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size(mut self, bytes: u64) -> Self {
        self.max_bytes = bytes;
        self
    }

    /// Set the maximum file size in megabytes; 0 selects the default
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size_mb(mut self, megabytes: u64) -> Self {
        let megabytes = if megabytes == 0 {
            DEFAULT_MAX_SIZE_MB
        } else {
            megabytes
        };
        self.max_bytes = megabytes.saturating_mul(MEGABYTE);
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_age(mut self, max_age: Option<Duration>) -> Self {
        self.max_age = max_age;
        self
    }

    /// Set the retention period in days; 0 keeps backups regardless of age
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_age_days(mut self, days: u64) -> Self {
        self.max_age = (days > 0).then(|| Duration::from_secs(days.saturating_mul(SECONDS_PER_DAY)));
        self
    }

    /// Set maximum backup files
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_local_time(mut self, enabled: bool) -> Self {
        self.local_time = enabled;
        self
    }

    /// Enable compression
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }
}

/// A retired log file found next to the active one
#[derive(Debug, Clone)]
struct Backup {
    path: PathBuf,
    /// File name without the compression suffix
    base_name: String,
    timestamp: DateTime<Utc>,
    compressed: bool,
}

/// Size-based rotating file appender
///
/// # Examples
///
/// ```no_run
/// use zapper::appenders::{RotatingFileAppender, RotationPolicy};
/// use zapper::Encoder;
///
/// // Default policy: rotate at 100 MB, keep every backup
/// let appender = RotatingFileAppender::new("/var/log/app.log").unwrap();
///
/// let policy = RotationPolicy::new()
///     .with_max_size_mb(10)
///     .with_max_backups(5)
///     .with_compression(true);
/// let appender = RotatingFileAppender::with_policy("/var/log/app.log", policy)
///     .unwrap()
///     .with_encoder(Encoder::json());
/// ```
pub struct RotatingFileAppender {
    base_path: PathBuf,
    policy: RotationPolicy,
    writer: Option<File>,
    current_size: u64,
    /// Timestamp in the name of the newest backup this appender created
    last_backup_at: Option<DateTime<Utc>>,
    encoder: Encoder,
}

impl RotatingFileAppender {
    /// Create a new rotating file appender
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be created or opened
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_policy(path, RotationPolicy::default())
    }

    /// Create a new rotating file appender with custom policy
    ///
    /// # Errors
    ///
    /// Returns error if the path is empty or the file cannot be created or opened
    pub fn with_policy<P: AsRef<Path>>(path: P, policy: RotationPolicy) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        if base_path.as_os_str().is_empty() {
            return Err(LoggerError::config(
                "RotatingFileAppender",
                "log file path is empty",
            ));
        }

        // Create parent directory if it doesn't exist
        if let Some(parent) = base_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let (file, current_size) = Self::open_file(&base_path)?;

        let appender = Self {
            base_path,
            policy,
            writer: Some(file),
            current_size,
            last_backup_at: None,
            encoder: Encoder::default(),
        };

        // Backups left by an earlier run follow the current retention rules
        if let Err(e) = appender.mill(Utc::now()) {
            eprintln!("[LOGGER WARNING] Failed to clean up log backups: {}", e);
        }

        Ok(appender)
    }

    #[must_use]
    pub fn with_encoder(mut self, encoder: Encoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// Get current file size
    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    /// Get base path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    /// Get rotation policy
    #[must_use]
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    fn open_file(path: &Path) -> Result<(File, u64)> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::file_appender(
                    path.display().to_string(),
                    format!("Failed to open: {}", e),
                )
            })?;

        let size = file
            .metadata()
            .map_err(|e| {
                LoggerError::file_appender(
                    path.display().to_string(),
                    format!("Cannot access file metadata: {}", e),
                )
            })?
            .len();

        Ok((file, size))
    }

    fn log_dir(&self) -> &Path {
        match self.base_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Backup names are `<stem>-<timestamp><ext>`; returns (`<stem>-`, `<ext>`)
    fn name_parts(&self) -> (String, String) {
        let stem = self
            .base_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = self
            .base_path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        (format!("{}-", stem), ext)
    }

    /// Backup file path for a rotation at `at`
    fn backup_path(&self, at: DateTime<Utc>) -> PathBuf {
        let timestamp = if self.policy.local_time {
            at.with_timezone(&Local).format(BACKUP_TIME_FORMAT).to_string()
        } else {
            at.format(BACKUP_TIME_FORMAT).to_string()
        };
        let (prefix, ext) = self.name_parts();
        self.base_path
            .with_file_name(format!("{}{}{}", prefix, timestamp, ext))
    }

    /// Next backup name, strictly newer than any this appender already used
    fn next_backup(&self, now: DateTime<Utc>) -> (PathBuf, DateTime<Utc>) {
        let mut at = match self.last_backup_at {
            Some(last) if last >= now => last + chrono::Duration::milliseconds(1),
            _ => now,
        };
        loop {
            let path = self.backup_path(at);
            if !path.exists() && !with_compress_suffix(&path).exists() {
                return (path, at);
            }
            at += chrono::Duration::milliseconds(1);
        }
    }

    fn parse_backup_time(&self, timestamp: &str) -> Option<DateTime<Utc>> {
        let naive = NaiveDateTime::parse_from_str(timestamp, BACKUP_TIME_FORMAT).ok()?;
        if self.policy.local_time {
            Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|t| t.with_timezone(&Utc))
        } else {
            Some(Utc.from_utc_datetime(&naive))
        }
    }

    /// Backups of this file, newest first
    fn list_backups(&self) -> Result<Vec<Backup>> {
        let dir = self.log_dir();
        let entries = fs::read_dir(dir).map_err(|e| {
            LoggerError::io_operation(
                "list log backups",
                format!("Failed to read directory '{}'", dir.display()),
                e,
            )
        })?;

        let (prefix, ext) = self.name_parts();
        let mut backups = Vec::new();

        for entry in entries.filter_map(|e| e.ok()) {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }

            let (base_name, compressed) = match name.strip_suffix(COMPRESS_SUFFIX) {
                Some(stripped) => (stripped, true),
                None => (name, false),
            };

            let timestamp = base_name
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_suffix(ext.as_str()))
                .and_then(|ts| self.parse_backup_time(ts));

            if let Some(timestamp) = timestamp {
                backups.push(Backup {
                    path: entry.path(),
                    base_name: base_name.to_string(),
                    timestamp,
                    compressed,
                });
            }
        }

        backups.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(backups)
    }

    /// Apply the retention rules and compress what is left
    fn mill(&self, now: DateTime<Utc>) -> Result<()> {
        if self.policy.max_backups == 0 && self.policy.max_age.is_none() && !self.policy.compress {
            return Ok(());
        }

        let mut remaining = self.list_backups()?;
        let mut expired = Vec::new();

        if self.policy.max_backups > 0 {
            // A backup and its compressed form count once
            let mut kept = HashSet::new();
            let (keep, remove): (Vec<_>, Vec<_>) = remaining.into_iter().partition(|b| {
                kept.insert(b.base_name.clone());
                kept.len() <= self.policy.max_backups
            });
            remaining = keep;
            expired.extend(remove);
        }

        if let Some(cutoff) = self
            .policy
            .max_age
            .and_then(|age| chrono::Duration::from_std(age).ok())
            .and_then(|age| now.checked_sub_signed(age))
        {
            let (keep, remove): (Vec<_>, Vec<_>) =
                remaining.into_iter().partition(|b| b.timestamp >= cutoff);
            remaining = keep;
            expired.extend(remove);
        }

        let mut first_error = None;

        for backup in &expired {
            if let Err(e) = fs::remove_file(&backup.path) {
                first_error.get_or_insert(LoggerError::io_operation(
                    "remove log backup",
                    format!("Failed to remove '{}'", backup.path.display()),
                    e,
                ));
            }
        }

        if self.policy.compress {
            for backup in remaining.iter().filter(|b| !b.compressed) {
                if let Err(e) = compress_file(&backup.path) {
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Perform log rotation
    fn rotate(&mut self, now: DateTime<Utc>) -> Result<()> {
        // Close the current file before renaming it
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        if self.base_path.exists() {
            let (backup, at) = self.next_backup(now);
            fs::rename(&self.base_path, &backup).map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to rotate current log file: {}", e),
                )
            })?;
            self.last_backup_at = Some(at);
        }

        let (file, size) = Self::open_file(&self.base_path).map_err(|e| {
            LoggerError::file_rotation(
                self.base_path.display().to_string(),
                format!("Failed to create new log file: {}", e),
            )
        })?;
        self.writer = Some(file);
        self.current_size = size;

        // Retention problems never block writing to the new file
        if let Err(e) = self.mill(now) {
            eprintln!("[LOGGER WARNING] Failed to clean up log backups: {}", e);
        }

        Ok(())
    }

    fn should_rotate(&self, incoming: u64) -> bool {
        self.writer.is_none()
            || (self.current_size > 0
                && self.current_size.saturating_add(incoming) > self.policy.max_bytes)
    }
}

impl Appender for RotatingFileAppender {
    fn name(&self) -> &str {
        "file"
    }

    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let mut line = self.encoder.encode(entry);
        line.push('\n');
        let bytes = line.len() as u64;

        if self.should_rotate(bytes) {
            if let Err(e) = self.rotate(Utc::now()) {
                eprintln!(
                    "[LOGGER WARNING] Log rotation failed: {}. Continuing with current file.",
                    e
                );

                if self.writer.is_none() {
                    match Self::open_file(&self.base_path) {
                        Ok((file, _)) => self.writer = Some(file),
                        Err(reopen_err) => {
                            eprintln!(
                                "[LOGGER ERROR] Failed to reopen log file after rotation failure: {}",
                                reopen_err
                            );
                            return Err(e);
                        }
                    }
                }

                // Let the file outgrow the limit instead of retrying on every record
                self.current_size = 0;
            }
        }

        match self.writer.as_mut() {
            Some(writer) => {
                writer.write_all(line.as_bytes()).map_err(|e| {
                    LoggerError::file_appender(
                        self.base_path.display().to_string(),
                        format!("Failed to write log entry: {}", e),
                    )
                })?;
                self.current_size += bytes;
                Ok(())
            }
            None => Err(LoggerError::writer("Writer not initialized")),
        }
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::file_appender(
                    self.base_path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }
}

fn with_compress_suffix(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(COMPRESS_SUFFIX);
    PathBuf::from(name)
}

/// Gzip `path` into `path.gz`, removing the original only once the compressed
/// copy is complete
fn compress_file(path: &Path) -> Result<()> {
    use std::io::{BufReader, BufWriter};

    let gz_path = with_compress_suffix(path);
    let mut temp_name = gz_path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_gz_path = PathBuf::from(temp_name);

    let input = File::open(path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to open file for compression: {}", path.display()),
            e,
        )
    })?;
    let mut reader = BufReader::with_capacity(64 * 1024, input);

    let output = File::create(&temp_gz_path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!(
                "Failed to create temporary compressed file: {}",
                temp_gz_path.display()
            ),
            e,
        )
    })?;
    let mut encoder = flate2::write::GzEncoder::new(
        BufWriter::with_capacity(64 * 1024, output),
        flate2::Compression::default(),
    );

    let compressed = std::io::copy(&mut reader, &mut encoder)
        .and_then(|_| encoder.finish())
        .and_then(|mut out| out.flush());
    if let Err(e) = compressed {
        let _ = fs::remove_file(&temp_gz_path);
        return Err(LoggerError::io_operation(
            "compress log file",
            format!("Failed to compress {}", path.display()),
            e,
        ));
    }

    fs::rename(&temp_gz_path, &gz_path).map_err(|e| {
        let _ = fs::remove_file(&temp_gz_path);
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to rename compressed file to: {}", gz_path.display()),
            e,
        )
    })?;

    if let Err(e) = fs::remove_file(path) {
        eprintln!(
            "[LOGGER WARNING] Compression succeeded but failed to remove original file {}: {}",
            path.display(),
            e
        );
    }

    Ok(())
}
