// 詳細ログ（ファイル出力）

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Instant;

/// グローバルな詳細ログフラグ
pub static VERBOSE_LOGGING: AtomicBool = AtomicBool::new(false);

/// ログファイルのグローバルハンドルと開始時刻
static LOG_FILE: Mutex<Option<(std::fs::File, Instant)>> = Mutex::new(None);

/// ログファイルを初期化する（既存の内容は切り詰める）
pub fn init_log_file(path: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    if let Ok(mut log_file) = LOG_FILE.lock() {
        *log_file = Some((file, Instant::now()));
    }
    Ok(())
}

/// ログファイルを閉じる
pub fn close_log_file() {
    if let Ok(mut log_file) = LOG_FILE.lock() {
        if let Some((ref mut file, _)) = *log_file {
            let _ = file.flush();
        }
        *log_file = None;
    }
}

/// ログをファイルに書き込む（開始からの経過ミリ秒付き）
pub fn write_log(message: String) {
    if let Ok(mut log_file) = LOG_FILE.lock() {
        if let Some((ref mut file, started)) = *log_file {
            let ms = started.elapsed().as_millis();
            let _ = writeln!(file, "[{:>8}ms] {}", ms, message);
            let _ = file.flush();
        }
    }
}

/// 詳細ログを有効にする
pub fn enable_verbose_logging() {
    VERBOSE_LOGGING.store(true, Ordering::Relaxed);
}

/// 詳細ログを無効にする
pub fn disable_verbose_logging() {
    VERBOSE_LOGGING.store(false, Ordering::Relaxed);
}

/// 詳細ログが有効かチェック
pub fn is_verbose() -> bool {
    VERBOSE_LOGGING.load(Ordering::Relaxed)
}

/// 詳細ログ出力マクロ（ファイル出力）
#[macro_export]
macro_rules! vlog {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            let message = format!($($arg)*);
            $crate::logging::write_log(message);
        }
    };
}
