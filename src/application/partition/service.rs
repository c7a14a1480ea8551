// 分割探索サービス

use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use std::hash::Hash;
use std::sync::Arc;

use super::engine::run_sequential;
use super::event::SearchEvent;
use super::parallel::run_parallel;
use crate::application::progress::{ProgressManager, ProgressStats};
use crate::domain::search::{bell_number, SearchConfig, SearchOutcome, SearchSummary};
use crate::domain::{linearize, ConflictMatrix, ConflictRelation, Partition};
use crate::infrastructure::executor::ParallelExecutor;
use crate::vlog;

/// 探索ハンドル（別スレッドからの中断用）
#[derive(Clone)]
pub struct SearchHandle {
    progress: Arc<ProgressManager>,
}

impl SearchHandle {
    /// 探索を中断
    pub fn abort(&self) {
        self.progress.abort();
    }

    /// 中断されたかチェック
    pub fn is_aborted(&self) -> bool {
        self.progress.is_aborted()
    }

    /// 進捗統計を取得
    pub fn get_progress(&self) -> ProgressStats {
        self.progress.get_stats()
    }
}

/// 最小分割探索を管理するサービス
pub struct PartitionService {
    config: SearchConfig,
    executor: ParallelExecutor,
    progress: Arc<ProgressManager>,
}

impl PartitionService {
    pub fn new(config: SearchConfig) -> Self {
        let budget = config.leaf_budget.map(|b| b.get());
        Self {
            config,
            executor: ParallelExecutor::default(),
            progress: Arc::new(ProgressManager::with_leaf_budget(budget)),
        }
    }

    /// 並列実行に使うエグゼキューターを差し替える
    pub fn with_executor(mut self, executor: ParallelExecutor) -> Self {
        self.executor = executor;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// 中断用ハンドル
    pub fn handle(&self) -> SearchHandle {
        SearchHandle {
            progress: Arc::clone(&self.progress),
        }
    }

    /// 入力の検証
    fn validate_inputs(&self, item_count: usize) -> Result<()> {
        self.config.validate().context("探索設定が不正です")?;
        self.config
            .max_items
            .check(item_count)
            .context("入力が大きすぎます（上限を外すと探索は続行できます）")?;
        Ok(())
    }

    /// 最小分割を求める（メインユースケース）
    pub fn partition<T>(&self, relation: &ConflictRelation<T>) -> Result<SearchOutcome<T>>
    where
        T: Clone + Eq + Hash,
    {
        self.run(relation, None)
    }

    /// イベントを送りながら最小分割を求める
    pub fn partition_with_events<T>(
        &self,
        relation: &ConflictRelation<T>,
        events: &Sender<SearchEvent>,
    ) -> Result<SearchOutcome<T>>
    where
        T: Clone + Eq + Hash,
    {
        self.run(relation, Some(events))
    }

    fn run<T>(
        &self,
        relation: &ConflictRelation<T>,
        events: Option<&Sender<SearchEvent>>,
    ) -> Result<SearchOutcome<T>>
    where
        T: Clone + Eq + Hash,
    {
        // 1. 線形化と事前検証
        let items = linearize(relation);
        self.validate_inputs(items.len())
            .context("入力の検証に失敗しました")?;

        // 2. 衝突行列と進捗をこの呼び出し専用に準備
        let matrix = ConflictMatrix::build(relation, &items);
        self.progress.reset();

        // 予算付きの並列探索はどの葉が数えられるかがスケジューリング次第になるため逐次で行う
        let parallel = self.config.parallel && self.config.leaf_budget.is_none();
        if self.config.parallel && !parallel {
            vlog!("葉の予算が指定されているため逐次探索で実行します");
            if let Some(tx) = events {
                let _ = tx.send(SearchEvent::Log(
                    "葉の予算が指定されているため逐次探索で実行します".to_string(),
                ));
            }
        }

        let mut summary = SearchSummary::new(items.len());
        summary.conflict_pairs = matrix.conflict_count();
        summary.parallel = parallel;
        vlog!(
            "探索開始: 項目 {} / 衝突ペア {} / 総葉数 {} / 並列={}",
            items.len(),
            summary.conflict_pairs,
            summary.total_leaves,
            summary.parallel
        );
        if let Some(tx) = events {
            let _ = tx.send(SearchEvent::Started {
                item_count: items.len(),
                total_leaves: bell_number(items.len()),
                parallel: summary.parallel,
            });
        }

        // 3. 探索（開始前に届いた中断要求もここで効く）
        let searched = if parallel {
            run_parallel(
                &matrix,
                self.config.split_depth.get(),
                &self.progress,
                &self.executor,
            )
        } else {
            Ok(run_sequential(&matrix, &self.progress, events))
        };
        // 中断要求はこの一回で消費する
        let complete = !self.progress.is_aborted();
        self.progress.clear_abort();
        let best = searched.context("並列探索に失敗しました")?;

        // 打ち切りで何も記録できなかった場合は常に妥当な全単独分割
        let partition = match best {
            Some(groups) => Partition::from_indices(&groups, &items),
            None => Partition::singletons(items),
        };

        // 4. サマリー
        summary.leaves_visited = self.progress.leaves_visited();
        summary.complete = complete;
        summary.elapsed_seconds = self.progress.elapsed().as_secs_f64();
        summary.leaves_per_second = self.progress.leaves_per_second();
        vlog!(
            "探索終了: {} グループ / 葉 {} / 完了={} / {:.3}s",
            partition.group_count(),
            summary.leaves_visited,
            summary.complete,
            summary.elapsed_seconds
        );
        if let Some(tx) = events {
            if !summary.complete {
                let _ = tx.send(SearchEvent::Log(format!(
                    "探索を打ち切りました（葉 {} / {}）",
                    summary.leaves_visited, summary.total_leaves
                )));
            }
            let _ = tx.send(SearchEvent::Finished(summary.clone()));
        }

        Ok(SearchOutcome { partition, summary })
    }
}

impl Default for PartitionService {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
