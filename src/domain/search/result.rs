// 探索結果の定義

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::domain::partition::Partition;

/// Bell(n) - n 項目の分割の総数（＝完全探索で訪れる葉の数）
///
/// ベル三角形で計算する。
pub fn bell_number(n: usize) -> BigUint {
    if n == 0 {
        return BigUint::one();
    }
    let mut row = vec![BigUint::one()];
    for _ in 1..n {
        let mut next = Vec::with_capacity(row.len() + 1);
        let mut acc = row[row.len() - 1].clone();
        next.push(acc.clone());
        for v in &row {
            acc += v;
            next.push(acc.clone());
        }
        row = next;
    }
    row.pop().unwrap_or_else(BigUint::zero)
}

/// 探索サマリー
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchSummary {
    pub item_count: usize,
    pub conflict_pairs: usize,
    pub total_leaves: BigUint,
    pub leaves_visited: u64,
    pub complete: bool,
    pub parallel: bool,
    pub elapsed_seconds: f64,
    pub leaves_per_second: f64,
}

impl SearchSummary {
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            conflict_pairs: 0,
            total_leaves: bell_number(item_count),
            leaves_visited: 0,
            complete: false,
            parallel: false,
            elapsed_seconds: 0.0,
            leaves_per_second: 0.0,
        }
    }
}

/// 単一の探索結果
#[derive(Clone, Debug)]
pub struct SearchOutcome<T> {
    pub partition: Partition<T>,
    pub summary: SearchSummary,
}

impl<T> SearchOutcome<T> {
    pub fn group_count(&self) -> usize {
        self.partition.group_count()
    }

    pub fn is_complete(&self) -> bool {
        self.summary.complete
    }
}

/// 書き出し用の探索レポート（項目は文字列化）
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchReport {
    pub groups: Vec<Vec<String>>,
    pub group_count: usize,
    pub summary: SearchSummary,
}

impl SearchReport {
    pub fn from_outcome<T: Display>(outcome: &SearchOutcome<T>) -> Self {
        Self {
            groups: outcome
                .partition
                .groups()
                .iter()
                .map(|g| g.iter().map(|item| item.to_string()).collect())
                .collect(),
            group_count: outcome.group_count(),
            summary: outcome.summary.clone(),
        }
    }
}
