//! Session log written to a single file in the OS data directory.
//!
//! Each launch truncates the previous session's file, so the log never grows
//! past one run.  Locations follow the platform conventions:
//!
//!   Windows:  `%APPDATA%\Easel\easel.log`
//!   macOS:    `~/Library/Application Support/Easel/easel.log`
//!   Linux:    `$XDG_DATA_HOME` (or `~/.local/share`) `/Easel/easel.log`
//!
//! Call [`init`] once at startup, then use the `log_info!` / `log_warn!` /
//! `log_err!` macros anywhere in the crate.  Logging failures are swallowed;
//! a broken log must never take the app down with it.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

static LOG_FILE: OnceLock<Mutex<File>> = OnceLock::new();

/// Append one raw line to the session log, ignoring I/O errors.
fn raw_line(line: &str) {
    if let Some(mutex) = LOG_FILE.get()
        && let Ok(mut file) = mutex.lock()
    {
        let _ = writeln!(file, "{}", line);
    }
}

/// Append a timestamped, level-tagged line.  The log macros route here.
pub fn write(level: &str, msg: &str) {
    raw_line(&format!("[{}] [{}] {}", clock(), level, msg));
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logger::write("INFO", &format!($($arg)*));
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logger::write("WARN", &format!($($arg)*));
    };
}

#[macro_export]
macro_rules! log_err {
    ($($arg:tt)*) => {
        $crate::logger::write("ERROR", &format!($($arg)*));
    };
}

/// Set up the session log file and the panic mirror.  Call once, first.
///
/// Creates the app data folder if needed and truncates any previous log.
/// When the file cannot be opened, logging becomes a no-op and the app
/// carries on.
pub fn init() {
    let path = log_file_path();
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    match OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)
    {
        Ok(file) => {
            let _ = LOG_FILE.set(Mutex::new(file));
        }
        Err(e) => {
            eprintln!("[logger] could not open {:?}: {}", path, e);
            return;
        }
    }

    raw_line(&format!(
        "=== Easel session started (unix {}) ===",
        epoch_secs()
    ));
    raw_line(&format!("Log file: {}", path.display()));
    raw_line("");

    // Mirror panics into the log before the default handler runs.
    let prev = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        write("PANIC", &info.to_string());
        prev(info);
    }));
}

fn log_file_path() -> PathBuf {
    data_dir().join("Easel").join("easel.log")
}

/// Platform data directory, before the app folder is appended.
fn data_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(appdata) = std::env::var("APPDATA") {
        return PathBuf::from(appdata);
    }
    #[cfg(target_os = "macos")]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join("Library")
            .join("Application Support");
    }
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("share");
    }
    // Last resort: whatever directory we were launched from.
    PathBuf::from(".")
}

/// Wall-clock HH:MM:SS derived from the epoch, good enough for one session.
fn clock() -> String {
    let secs = epoch_secs();
    format!(
        "{:02}:{:02}:{:02}",
        (secs % 86400) / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
