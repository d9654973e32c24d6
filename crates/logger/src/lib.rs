//! Logging infrastructure for lunar.
//!
//! Keeps the last N messages in memory for the status line and appends
//! every message to a log file. [`init`] also installs the logger behind
//! the `log` facade, so library crates just use `log::info!` and friends.

use chrono::Local;
use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

/// Log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Timestamp in HH:MM:SS format
    pub timestamp: String,
    /// Message level
    pub level: LogLevel,
    /// Message text
    pub message: String,
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert log level to string
    pub fn to_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug | log::Level::Trace => LogLevel::Debug,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

/// Logger state
#[derive(Debug)]
struct Logger {
    /// Last N messages
    entries: VecDeque<LogEntry>,
    /// Maximum number of entries in log
    max_entries: usize,
    /// Minimum log level to record
    min_level: LogLevel,
    /// Log file path
    file_path: PathBuf,
}

impl Logger {
    /// Create new logger instance
    fn new(file_path: PathBuf, max_entries: usize, min_level: LogLevel) -> Self {
        // Create parent directory if it doesn't exist
        if let Some(parent) = file_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        // Clear log file on startup
        if let Ok(mut file) = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)
        {
            let _ = writeln!(file, "=== Lunar Log Start ===");
        }

        Self {
            entries: VecDeque::new(),
            max_entries,
            min_level,
            file_path,
        }
    }

    /// Add entry to log
    fn add_entry(&mut self, level: LogLevel, message: String) {
        if level < self.min_level {
            return;
        }

        let timestamp = Local::now().format("%H:%M:%S").to_string();
        let line = format!("[{}] {}: {}", timestamp, level.to_str(), message);

        self.entries.push_back(LogEntry {
            timestamp,
            level,
            message,
        });
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }

        // Write to file (create if deleted)
        if let Ok(mut file) = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.file_path)
        {
            let _ = writeln!(file, "{}", line);
        }
    }

    fn get_entries(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }
}

/// Global logger instance that persists for the application lifetime.
static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

/// Forwards `log` facade records into the global logger.
struct FacadeBridge;

static BRIDGE: FacadeBridge = FacadeBridge;

impl log::Log for FacadeBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = match record.module_path() {
            Some(module) if !module.starts_with("lunar") => {
                format!("{}: {}", module, record.args())
            }
            _ => record.args().to_string(),
        };
        add(record.level().into(), message);
    }

    fn flush(&self) {}
}

/// Initialize the global logger.
///
/// Must be called once at application startup. Subsequent calls are
/// ignored. Before initialization every logging call is a no-op.
///
/// # Arguments
///
/// * `file_path` - Path to the log file
/// * `max_entries` - Maximum number of log entries to keep in memory
/// * `min_level` - Minimum log level to record (Debug, Info, Warn, Error)
pub fn init(file_path: PathBuf, max_entries: usize, min_level: LogLevel) {
    let mut installed = false;
    LOGGER.get_or_init(|| {
        installed = true;
        Mutex::new(Logger::new(file_path, max_entries, min_level))
    });
    if installed && log::set_logger(&BRIDGE).is_ok() {
        log::set_max_level(min_level.to_filter());
    }
}

fn add(level: LogLevel, message: String) {
    if let Some(Ok(mut logger)) = LOGGER.get().map(Mutex::lock) {
        logger.add_entry(level, message);
    }
}

/// Set minimum log level dynamically
pub fn set_min_level(level: LogLevel) {
    if let Some(Ok(mut logger)) = LOGGER.get().map(Mutex::lock) {
        logger.min_level = level;
        log::set_max_level(level.to_filter());
    }
}

/// Log a debug message
pub fn debug(message: impl Into<String>) {
    add(LogLevel::Debug, message.into());
}

/// Log an informational message
pub fn info(message: impl Into<String>) {
    add(LogLevel::Info, message.into());
}

/// Log a warning message
pub fn warn(message: impl Into<String>) {
    add(LogLevel::Warn, message.into());
}

/// Log an error message
pub fn error(message: impl Into<String>) {
    add(LogLevel::Error, message.into());
}

/// Get all log entries currently stored in memory.
pub fn get_entries() -> Vec<LogEntry> {
    match LOGGER.get().map(Mutex::lock) {
        Some(Ok(logger)) => logger.get_entries(),
        _ => Vec::new(),
    }
}

/// Most recent entry, shown on the status line.
pub fn last_entry() -> Option<LogEntry> {
    match LOGGER.get().map(Mutex::lock) {
        Some(Ok(logger)) => logger.entries.back().cloned(),
        _ => None,
    }
}
