// 並列分割探索 - 先頭 k 項目の部分分割ごとに枝を分ける
//
// プレフィックスは逐次探索が訪れる順に列挙し、各枝は独立した部分分割と
// トラッカーで探索する。結果はプレフィックス順に厳密な < で統合するので、
// 同数タイの勝者は逐次探索と同じ（全体の列挙順で最初の最小分割）になる。

use anyhow::Result;
use rayon::prelude::*;
use std::ops::ControlFlow;

use super::engine::Backtracker;
use super::tracker::BestTracker;
use crate::application::progress::ProgressManager;
use crate::domain::ConflictMatrix;
use crate::infrastructure::executor::ParallelExecutor;
use crate::vlog;

/// 先頭 `depth` 項目の全部分分割を、逐次探索の訪問順で列挙する（Bell(depth) 個）
pub fn enumerate_prefixes(depth: usize) -> Vec<Vec<Vec<usize>>> {
    fn rec(idx: usize, depth: usize, curr: &mut Vec<Vec<usize>>, out: &mut Vec<Vec<Vec<usize>>>) {
        if idx == depth {
            out.push(curr.clone());
            return;
        }
        for g in 0..=curr.len() {
            if g == curr.len() {
                curr.push(vec![idx]);
                rec(idx + 1, depth, curr, out);
                curr.pop();
            } else {
                curr[g].push(idx);
                rec(idx + 1, depth, curr, out);
                curr[g].pop();
            }
        }
    }
    let mut out = Vec::new();
    rec(0, depth, &mut Vec::new(), &mut out);
    out
}

/// 並列探索を実行し、最良の分割（インデックス表現）を返す
///
/// 衝突行列は読み取り専用で共有し、部分分割とトラッカーは枝ごとに持つ。
pub fn run_parallel(
    matrix: &ConflictMatrix,
    split_depth: usize,
    progress: &ProgressManager,
    executor: &ParallelExecutor,
) -> Result<Option<Vec<Vec<usize>>>> {
    let depth = split_depth.min(matrix.len());
    let prefixes = enumerate_prefixes(depth);
    vlog!(
        "並列探索: 分割深さ {} / 枝 {} 本 / ワーカー {}",
        depth,
        prefixes.len(),
        executor.num_workers()
    );

    let trackers: Vec<BestTracker> = executor.install(|| {
        prefixes
            .into_par_iter()
            .map(|mut curr| {
                let mut tracker = BestTracker::new();
                if let ControlFlow::Break(()) =
                    Backtracker::new(matrix, progress).run(depth, &mut curr, &mut tracker)
                {
                    vlog!("枝を打ち切りました（葉 {} 個時点）", progress.leaves_visited());
                }
                tracker
            })
            .collect()
    })?;

    Ok(BestTracker::merge_in_order(trackers).into_best())
}
