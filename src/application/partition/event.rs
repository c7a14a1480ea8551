// 分割探索のイベント定義（表示層に依存しない）

use num_bigint::BigUint;

use crate::domain::search::SearchSummary;

/// 探索エンジンからのイベント
#[derive(Clone, Debug)]
pub enum SearchEvent {
    /// 探索開始
    Started {
        item_count: usize,
        total_leaves: BigUint,
        parallel: bool,
    },
    /// 最良結果の更新（グループ数と、その時点で評価した葉の数）
    Improved { group_count: usize, leaves_visited: u64 },
    /// ログメッセージ
    Log(String),
    /// 探索完了
    Finished(SearchSummary),
}
