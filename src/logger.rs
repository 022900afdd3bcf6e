// In-app logger: mirrors records to stderr (opt-in), keeps a bounded
// buffer for the logs window, persists warn+ lines to log.txt and
// installs a panic hook so crashes land in the same file.

use std::collections::VecDeque;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use lazy_static::lazy_static;
use log::{Level, LevelFilter, Log, Metadata, Record};

#[derive(Clone)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub msg: String,
}

const MAX_LOG_LINES: usize = 5000;
const LOG_FILE_NAME: &str = "log.txt";

lazy_static! {
    static ref LOGS: Mutex<VecDeque<LogEntry>> = Mutex::new(VecDeque::new());
    static ref LOG_FILE: Mutex<Option<std::fs::File>> = Mutex::new(None);
    static ref MIRROR_STDERR: bool = {
        let v = std::env::var("GUI_LOG_STDERR").unwrap_or_else(|_| "0".to_string());
        matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
    };
}

static NEW_LOGS: AtomicBool = AtomicBool::new(false);

struct DashLogger;

impl Log for DashLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        log::max_level()
            .to_level()
            .map(|max| metadata.level() <= max)
            .unwrap_or(false)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "[{}] [{:>5}] {}: {}",
            timestamp_millis(),
            record.level(),
            record.target(),
            record.args()
        );

        if *MIRROR_STDERR {
            eprintln!("{line}");
        }

        if matches!(record.level(), Level::Warn | Level::Error) {
            write_file_line(&line);
        }

        push_entry(LogEntry {
            level: record.level(),
            target: record.target().to_string(),
            msg: record.args().to_string(),
        });
    }

    fn flush(&self) {
        if let Ok(mut lf) = LOG_FILE.lock() {
            if let Some(f) = lf.as_mut() {
                let _ = f.flush();
            }
        }
    }
}

fn push_entry(entry: LogEntry) {
    if let Ok(mut buf) = LOGS.lock() {
        buf.push_back(entry);
        if buf.len() > MAX_LOG_LINES {
            buf.pop_front();
        }
    }
    NEW_LOGS.store(true, Ordering::Relaxed);
}

fn level_from_env() -> Option<LevelFilter> {
    let val = std::env::var("RUST_LOG").ok()?.to_lowercase();
    for (needle, level) in [
        ("trace", LevelFilter::Trace),
        ("debug", LevelFilter::Debug),
        ("info", LevelFilter::Info),
        ("warn", LevelFilter::Warn),
        ("error", LevelFilter::Error),
        ("off", LevelFilter::Off),
    ] {
        if val.contains(needle) {
            return Some(level);
        }
    }
    None
}

/// Install the logger, open log.txt and hook panics.
pub fn init() {
    let _ = log::set_boxed_logger(Box::new(DashLogger));
    let level = level_from_env().unwrap_or(LevelFilter::Debug);
    log::set_max_level(level);

    if let Ok(mut lf) = LOG_FILE.lock() {
        *lf = OpenOptions::new()
            .create(true)
            .append(true)
            .open(LOG_FILE_NAME)
            .ok();
    }

    install_panic_hook();

    log::info!("logger initialized at level {level} (persisting warnings to {LOG_FILE_NAME})");
}

pub fn for_each_range<F: FnMut(&LogEntry)>(start: usize, end: usize, mut f: F) {
    if let Ok(buf) = LOGS.lock() {
        let len = buf.len();
        for idx in start.min(len)..end.min(len) {
            if let Some(entry) = buf.get(idx) {
                f(entry);
            }
        }
    }
}

pub fn all_lines() -> Vec<String> {
    if let Ok(buf) = LOGS.lock() {
        buf.iter()
            .map(|e| format!("[{:>5}] {}: {}", e.level, e.target, e.msg))
            .collect()
    } else {
        Vec::new()
    }
}

pub fn len() -> usize {
    LOGS.lock().map(|buf| buf.len()).unwrap_or(0)
}

pub fn clear() {
    if let Ok(mut buf) = LOGS.lock() {
        buf.clear();
    }
    NEW_LOGS.store(true, Ordering::Relaxed);
}

/// Returns true if new logs arrived since the last call.
pub fn take_new_flag() -> bool {
    NEW_LOGS.swap(false, Ordering::Relaxed)
}

fn timestamp_millis() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:03}", now.as_secs(), now.subsec_millis())
}

fn write_file_line(line: &str) {
    if let Ok(mut lf) = LOG_FILE.lock() {
        if let Some(f) = lf.as_mut() {
            let _ = writeln!(f, "{line}");
            let _ = f.flush();
        }
    }
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            *s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.as_str()
        } else {
            "Box<Any>"
        };
        let loc = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());

        write_file_line(&format!(
            "[{}] [ERROR] panic at {loc}: {msg}",
            timestamp_millis()
        ));
        log::error!("panic at {loc}: {msg}");
    }));
}
