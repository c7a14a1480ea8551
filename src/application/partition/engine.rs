// 分割探索エンジン - 全分割のバックトラック列挙
//
// 項目 i ごとに「既存グループ 0, 1, ... の順に追加、最後に新グループ」を試す。
// n 項目で Bell(n) 個の葉をすべて訪れ、妥当性は葉でのみ判定する。
// 途中での枝刈りはしない。

use crossbeam_channel::Sender;
use std::hash::Hash;
use std::ops::ControlFlow;

use super::event::SearchEvent;
use super::tracker::BestTracker;
use crate::application::progress::ProgressManager;
use crate::domain::{ConflictMatrix, ConflictRelation, Partition};
use crate::vlog;

/// バックトラック探索器
///
/// 部分分割 `curr` は再帰の間その場で変更され、戻るときに元に戻す。
/// 探索カーソルは常に一つなので共有の可変参照は不要。
pub struct Backtracker<'a> {
    matrix: &'a ConflictMatrix,
    progress: &'a ProgressManager,
    events: Option<&'a Sender<SearchEvent>>,
}

impl<'a> Backtracker<'a> {
    pub fn new(matrix: &'a ConflictMatrix, progress: &'a ProgressManager) -> Self {
        Self {
            matrix,
            progress,
            events: None,
        }
    }

    /// 更新イベントの送信先を設定
    pub fn with_events(mut self, events: Option<&'a Sender<SearchEvent>>) -> Self {
        self.events = events;
        self
    }

    /// 項目 `start` から探索する（`curr` は先頭 `start` 項目の部分分割）
    ///
    /// 予算切れ・中断で打ち切った場合は Break を返す。どちらの場合も
    /// `curr` は呼び出し時の状態に戻っている。
    pub fn run(
        &self,
        start: usize,
        curr: &mut Vec<Vec<usize>>,
        tracker: &mut BestTracker,
    ) -> ControlFlow<()> {
        self.backtrack(start, curr, tracker)
    }

    fn backtrack(
        &self,
        idx: usize,
        curr: &mut Vec<Vec<usize>>,
        tracker: &mut BestTracker,
    ) -> ControlFlow<()> {
        // 葉処理
        if idx == self.matrix.len() {
            if !self.progress.admit_leaf() {
                return ControlFlow::Break(());
            }
            // 更新にならない葉は妥当性判定を省略（記録条件は同じ）
            if tracker.improves(curr.len()) && self.matrix.is_valid(curr) {
                tracker.offer(curr);
                self.progress.add_improvement();
                self.report_improvement(curr.len());
            }
            return ControlFlow::Continue(());
        }

        for g in 0..=curr.len() {
            let flow = if g == curr.len() {
                curr.push(vec![idx]);
                let flow = self.backtrack(idx + 1, curr, tracker);
                curr.pop();
                flow
            } else {
                curr[g].push(idx);
                let flow = self.backtrack(idx + 1, curr, tracker);
                curr[g].pop();
                flow
            };
            if flow.is_break() {
                return flow;
            }
        }
        ControlFlow::Continue(())
    }

    fn report_improvement(&self, group_count: usize) {
        let leaves_visited = self.progress.leaves_visited();
        vlog!(
            "最良更新: {} グループ（葉 {} 個目）",
            group_count,
            leaves_visited
        );
        if let Some(tx) = self.events {
            let _ = tx.send(SearchEvent::Improved {
                group_count,
                leaves_visited,
            });
        }
    }
}

/// 逐次探索を実行し、最良の分割（インデックス表現）を返す
///
/// 打ち切られて何も記録されなかった場合は None。
pub fn run_sequential(
    matrix: &ConflictMatrix,
    progress: &ProgressManager,
    events: Option<&Sender<SearchEvent>>,
) -> Option<Vec<Vec<usize>>> {
    let mut tracker = BestTracker::new();
    let mut curr: Vec<Vec<usize>> = Vec::with_capacity(matrix.len());
    if let ControlFlow::Break(()) = Backtracker::new(matrix, progress)
        .with_events(events)
        .run(0, &mut curr, &mut tracker)
    {
        vlog!("探索を打ち切りました（葉 {} 個時点）", progress.leaves_visited());
    }
    tracker.into_best()
}

/// 項目列を最小グループ数で分割する（逐次・制限なし）
///
/// 計算量は Bell(n)。全単独分割は常に妥当なので必ず結果を返す。
pub fn search<T: Clone + Eq + Hash>(relation: &ConflictRelation<T>, items: &[T]) -> Partition<T> {
    let matrix = ConflictMatrix::build(relation, items);
    let progress = ProgressManager::new();
    match run_sequential(&matrix, &progress, None) {
        Some(best) => Partition::from_indices(&best, items),
        None => Partition::singletons(items.to_vec()),
    }
}
