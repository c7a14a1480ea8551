// 進捗管理 - 葉の計数・予算・中断フラグ

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// 進捗統計
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressStats {
    pub leaves_visited: u64,
    pub improvements: u64,
    pub aborted: bool,
}

/// 進捗マネージャー
///
/// 探索エンジンは葉を評価する前に必ず `admit_leaf` を通す。予算切れか
/// 中断要求があれば false を返し、エンジンは巻き戻って終了する。
pub struct ProgressManager {
    abort_flag: Arc<AtomicBool>,
    leaves_visited: AtomicU64,
    improvements: AtomicU64,
    leaf_budget: Option<u64>,
    start_time: Mutex<Instant>,
}

impl ProgressManager {
    pub fn new() -> Self {
        Self {
            abort_flag: Arc::new(AtomicBool::new(false)),
            leaves_visited: AtomicU64::new(0),
            improvements: AtomicU64::new(0),
            leaf_budget: None,
            start_time: Mutex::new(Instant::now()),
        }
    }

    /// 葉の予算付きで作成
    pub fn with_leaf_budget(budget: Option<u64>) -> Self {
        Self {
            leaf_budget: budget,
            ..Self::new()
        }
    }

    /// 検索を中断
    pub fn abort(&self) {
        self.abort_flag.store(true, Ordering::Relaxed);
    }

    /// 中断されたかチェック
    pub fn is_aborted(&self) -> bool {
        self.abort_flag.load(Ordering::Relaxed)
    }

    /// 葉の評価を許可するか（許可した葉だけを数える）
    pub fn admit_leaf(&self) -> bool {
        if self.is_aborted() {
            return false;
        }
        let visited = self.leaves_visited.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(budget) = self.leaf_budget {
            if visited > budget {
                self.leaves_visited.fetch_sub(1, Ordering::Relaxed);
                self.abort();
                return false;
            }
        }
        true
    }

    /// 最良結果の更新を記録
    pub fn add_improvement(&self) {
        self.improvements.fetch_add(1, Ordering::Relaxed);
    }

    pub fn leaves_visited(&self) -> u64 {
        self.leaves_visited.load(Ordering::Relaxed)
    }

    /// 現在の統計を取得
    pub fn get_stats(&self) -> ProgressStats {
        ProgressStats {
            leaves_visited: self.leaves_visited(),
            improvements: self.improvements.load(Ordering::Relaxed),
            aborted: self.is_aborted(),
        }
    }

    /// 経過時間を取得
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .lock()
            .map(|t| t.elapsed())
            .unwrap_or_default()
    }

    /// 探索速度（葉/秒）を取得
    pub fn leaves_per_second(&self) -> f64 {
        let leaves = self.leaves_visited() as f64;
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            leaves / elapsed
        } else {
            0.0
        }
    }

    /// 計数と開始時刻をリセット（予算と保留中の中断要求はそのまま）
    pub fn reset(&self) {
        self.leaves_visited.store(0, Ordering::Relaxed);
        self.improvements.store(0, Ordering::Relaxed);
        if let Ok(mut t) = self.start_time.lock() {
            *t = Instant::now();
        }
    }
}

impl ProgressManager {
    /// 中断要求を取り下げる（探索一回分の終了時に呼ぶ）
    pub fn clear_abort(&self) {
        self.abort_flag.store(false, Ordering::Relaxed);
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}
