// ============================================
// src/logger.rs
// ファイルへのログ出力（端末は TUI が使うため）
// ============================================

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record};

use crate::error::AppError;

const LOG_FILE: &str = "romaji-drill.log";
const MAX_FILE_BYTES: u64 = 1024 * 1024;

pub struct FileLogger {
    level: LevelFilter,
    path: PathBuf,
    max_file_bytes: u64,
    lock: Mutex<()>,
}

impl FileLogger {
    pub fn new(path: PathBuf, level: LevelFilter) -> Self {
        Self {
            level,
            path,
            max_file_bytes: MAX_FILE_BYTES,
            lock: Mutex::new(()),
        }
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record);
        let Ok(_guard) = self.lock.lock() else {
            return;
        };
        if let Err(err) = append_with_rotation(&self.path, self.max_file_bytes, &line) {
            eprintln!("[ERROR] logger write failed: {err}");
        }
    }

    fn flush(&self) {}
}

/// `dir/romaji-drill.log` に書くロガーをグローバルに登録する
pub fn init(dir: &Path, level: LevelFilter) -> Result<PathBuf, AppError> {
    let path = dir.join(LOG_FILE);
    log::set_boxed_logger(Box::new(FileLogger::new(path.clone(), level)))?;
    log::set_max_level(level);
    Ok(path)
}

fn format_line(record: &Record) -> String {
    format!(
        "[{}][{}][{}] {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.target(),
        record.args()
    )
}

/// 追記する。上限を超えるなら `.1` に退避してから書く
fn append_with_rotation(path: &Path, max_file_bytes: u64, line: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let current_len = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    if current_len > 0 && current_len.saturating_add(line.len() as u64) > max_file_bytes {
        let rotated = rotated_path(path);
        if rotated.exists() {
            fs::remove_file(&rotated)?;
        }
        fs::rename(path, rotated)?;
    }

    let mut f = OpenOptions::new().create(true).append(true).open(path)?;
    f.write_all(line.as_bytes())?;
    f.flush()
}

fn rotated_path(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.1", path.to_string_lossy()))
}
