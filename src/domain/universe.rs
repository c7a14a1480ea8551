// 項目の線形化 - 衝突関係から分割対象の項目列を導出

use indexmap::IndexSet;
use std::hash::Hash;

use super::relation::ConflictRelation;

/// 衝突関係を初出順の重複なし項目列に平坦化する
///
/// キーを定義順に走査し、キー自身、続いてその衝突リストを順に出力する。
/// 二度目以降の出現は捨てる（移動しない）。この順序が探索順、
/// ひいては同数タイの勝者を決める。
pub fn linearize<T: Clone + Eq + Hash>(relation: &ConflictRelation<T>) -> Vec<T> {
    let mut seen: IndexSet<&T> = IndexSet::new();
    for (item, conflicts) in relation.iter() {
        seen.insert(item);
        for other in conflicts {
            seen.insert(other);
        }
    }
    seen.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_relation_yields_nothing() {
        let rel: ConflictRelation<u8> = ConflictRelation::new();
        assert!(linearize(&rel).is_empty());
    }

    #[test]
    fn value_only_items_are_included() {
        let rel = ConflictRelation::new().with(1, vec![2, 3]).with(2, vec![3, 4]);
        assert_eq!(linearize(&rel), vec![1, 2, 3, 4]);
    }

    #[test]
    fn repeats_keep_first_position() {
        let rel = ConflictRelation::new()
            .with("b", vec!["c", "a"])
            .with("a", vec!["d", "b"])
            .with("e", vec!["d"]);
        assert_eq!(linearize(&rel), vec!["b", "c", "a", "d", "e"]);
    }

    #[test]
    fn duplicate_entries_in_one_list_collapse() {
        let rel = ConflictRelation::new().with('x', vec!['y', 'y', 'x']);
        assert_eq!(linearize(&rel), vec!['x', 'y']);
    }
}
