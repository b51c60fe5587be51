//! File logger behind the `log` facade.
//!
//! The binary is a GUI application (no console on Windows), so log records go
//! to `ori_menu_debug.log` next to the executable.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

/// Environment variable holding the maximum level (`error` .. `trace`).
pub const LOG_LEVEL_ENV: &str = "ORI_MENU_LOG";

/// Path of the debug log, next to the running executable.
pub fn log_path() -> PathBuf {
    exe_dir().join("ori_menu_debug.log")
}

/// Directory of the running executable, or `.` if unknown.
pub fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Appends formatted records to a file.
pub struct FileLogger {
    level: LevelFilter,
    file: Mutex<File>,
}

impl FileLogger {
    pub fn new(path: &Path, level: LevelFilter) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            level,
            file: Mutex::new(file),
        })
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record);
        let mut file = self.file.lock();
        // Nowhere to report a failed log write.
        let _ = file.write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = self.file.lock().flush();
    }
}

/// One log line: `LEVEL target: message\n`.
fn format_record(record: &Record<'_>) -> String {
    format!(
        "{:<5} {}: {}\n",
        record.level(),
        record.target(),
        record.args()
    )
}

/// Parse a level name, case-insensitively. Unknown names give `None`.
pub fn parse_level(s: &str) -> Option<LevelFilter> {
    s.trim().parse().ok()
}

/// Install the file logger. The level comes from [`LOG_LEVEL_ENV`],
/// defaulting to `info`.
///
/// Failing to open the log file leaves logging disabled; the application
/// still runs.
pub fn init() {
    let level = std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|v| parse_level(&v))
        .unwrap_or(LevelFilter::Info);

    let path = log_path();
    let logger = match FileLogger::new(&path, level) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("ori_menu: cannot open {}: {e}", path.display());
            return;
        }
    };
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
        log::info!("logging to {} at {level}", path.display());
    }
}
