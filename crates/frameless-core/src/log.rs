//! File-based logger with size-based rotation.
//!
//! Logs are written to `~/.config/frameless/logs/frameless.log`. When
//! the file exceeds the configured max size it is rotated to
//! `frameless.log.1` (one backup kept).

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

const LOG_FILE_NAME: &str = "frameless.log";

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether file logging is enabled. Defaults to `false`.
    pub enabled: bool,
    /// Minimum log level: "debug", "info", "warn", or "error".
    pub level: String,
    /// Maximum log file size in megabytes before rotation.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
            max_file_mb: 10,
        }
    }
}

/// Log severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Self::Debug,
            "warn" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

struct Logger {
    // `None` once a reopen after rotation failed.
    file: Option<File>,
    path: PathBuf,
    min_level: Level,
    max_bytes: u64,
    written: u64,
}

impl Logger {
    fn open(path: PathBuf, config: &LogConfig) -> Option<Self> {
        let file = append(&path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);
        Some(Self {
            file: Some(file),
            path,
            min_level: Level::parse(&config.level),
            max_bytes: config.max_file_mb.saturating_mul(1024 * 1024),
            written,
        })
    }

    fn record(&mut self, line: &str) {
        let Some(file) = self.file.as_mut() else {
            return;
        };
        if file.write_all(line.as_bytes()).is_err() {
            return;
        }
        self.written += line.len() as u64;
        if self.max_bytes > 0 && self.written >= self.max_bytes {
            self.rotate();
        }
    }

    /// Moves the full file aside and starts an empty one. The handle
    /// is closed first since Windows refuses to rename an open file.
    fn rotate(&mut self) {
        self.file = None;
        let _ = fs::rename(&self.path, backup_path(&self.path));
        self.file = append(&self.path);
        self.written = 0;
    }
}

fn append(path: &Path) -> Option<File> {
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// `frameless.log` rotates to `frameless.log.1`.
fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".1");
    PathBuf::from(name)
}

/// Initialises the global logger. Call once at startup.
///
/// Does nothing if `config.enabled` is `false` or the log file cannot
/// be opened.
pub fn init(config: &LogConfig) {
    if !config.enabled {
        return;
    }
    let Some(log_dir) = crate::config::config_dir().map(|d| d.join("logs")) else {
        return;
    };
    let _ = fs::create_dir_all(&log_dir);
    if let Some(logger) = Logger::open(log_dir.join(LOG_FILE_NAME), config) {
        let _ = LOGGER.set(Mutex::new(logger));
    }
}

/// Writes a log line if the level is at or above the configured minimum.
///
/// Bus callbacks and the refresher log from their own threads, so each
/// line carries the writer's thread name.
pub fn write(level: Level, args: fmt::Arguments<'_>) {
    let Some(mutex) = LOGGER.get() else {
        return;
    };
    let mut logger = mutex.lock().unwrap_or_else(PoisonError::into_inner);
    if level < logger.min_level {
        return;
    }
    let current = thread::current();
    let line = format_line(clock(), level, current.name().unwrap_or("worker"), args);
    logger.record(&line);
}

fn format_line(clock: String, level: Level, thread: &str, args: fmt::Arguments<'_>) -> String {
    format!("{clock} {:<5} [{thread}] {args}\n", level.as_str())
}

/// UTC wall-clock time of day.
fn clock() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let (h, m, s) = (secs / 3600 % 24, secs / 60 % 60, secs % 60);
    format!("{h:02}:{m:02}:{s:02}")
}

/// Logs at DEBUG level.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Debug, format_args!($($arg)*)) };
}

/// Logs at INFO level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Info, format_args!($($arg)*)) };
}

/// Logs at WARN level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Warn, format_args!($($arg)*)) };
}

/// Logs at ERROR level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Error, format_args!($($arg)*)) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_level_defaults_to_info() {
        assert_eq!(Level::parse("verbose"), Level::Info);
        assert_eq!(Level::parse("WARN"), Level::Warn);
    }

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Warn < Level::Error);
    }

    #[test]
    fn backup_keeps_the_full_file_name() {
        let path = Path::new("logs").join("frameless.log");
        assert_eq!(backup_path(&path), Path::new("logs").join("frameless.log.1"));
    }

    #[test]
    fn lines_carry_level_and_thread() {
        // Act
        let line = format_line("09:05:00".into(), Level::Warn, "refresher", format_args!("x={}", 3));

        // Assert
        assert_eq!(line, "09:05:00 WARN  [refresher] x=3\n");
    }

    #[test]
    fn rotation_moves_the_file_aside_once_full() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("frameless-log-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(LOG_FILE_NAME);
        let _ = fs::remove_file(&path);
        let _ = fs::remove_file(backup_path(&path));
        let mut logger = Logger::open(path.clone(), &LogConfig::default()).unwrap();
        logger.max_bytes = 16;

        // Act
        logger.record("0123456789\n");
        logger.record("0123456789\n");

        // Assert
        assert_eq!(fs::read_to_string(backup_path(&path)).unwrap().lines().count(), 2);
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
        assert_eq!(logger.written, 0);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn writing_without_init_is_a_no_op() {
        crate::log_error!("dropped {}", 1);
    }
}
