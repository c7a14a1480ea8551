// 衝突しない最小グループ分け - ライブラリモジュール
//
// 衝突関係（項目 → 同じグループに入れてはいけない項目）から、
// グループ数が最小になる分割を全探索で求める。計算量は Bell(n)。

pub mod constants;
pub mod domain;         // ドメイン層
pub mod application;    // アプリケーション層
pub mod infrastructure; // インフラ層
pub mod presentation;   // プレゼンテーション層
pub mod logging;

// 外部クレートの再エクスポート
pub use anyhow::{anyhow, Context, Result};
pub use num_bigint::BigUint;

// 主要な型を再エクスポート
pub use application::partition::search;
pub use application::{PartitionService, SearchEvent, SearchHandle};
pub use domain::search::{SearchConfig, SearchOutcome, SearchSummary};
pub use domain::{conflicts, linearize, ConflictRelation, Partition};

use std::hash::Hash;

/// 衝突関係からグループ数最小の分割を求める
///
/// 項目は関係の定義順（キー、続いてその衝突リスト）の初出順に並べ、
/// 同数の分割が複数あればその列挙順で最初に見つかったものを返す。
/// 上限ガードは無いので、大きな入力では Bell(n) に比例して時間がかかる。
pub fn minimum_partition<T: Clone + Eq + Hash>(relation: &ConflictRelation<T>) -> Partition<T> {
    search(relation, &linearize(relation))
}
