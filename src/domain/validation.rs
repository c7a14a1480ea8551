// 既知項目リストとの照合（外部から与えた項目一覧に無い項目を拒否）

use anyhow::{anyhow, Result};
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use super::relation::ConflictRelation;

/// 衝突関係に現れる全項目（キーと値）が既知項目に含まれるか検証する
///
/// 最初に見つかった未知項目を名指しで報告する。
pub fn validate_known_items<T>(relation: &ConflictRelation<T>, known: &[T]) -> Result<()>
where
    T: Eq + Hash + Display,
{
    let known: HashSet<&T> = known.iter().collect();
    for (item, conflicts) in relation.iter() {
        if !known.contains(item) {
            return Err(anyhow!("未知の項目です: {}", item));
        }
        for other in conflicts {
            if !known.contains(other) {
                return Err(anyhow!("未知の項目です: {}（{} の衝突リスト内）", other, item));
            }
        }
    }
    Ok(())
}
