// 衝突判定 - 両方向の衝突チェックとインデックス化した衝突行列

use std::hash::Hash;

use super::relation::ConflictRelation;
use crate::constants::{pair_key, U64Set};

/// x と y が衝突するか（x→y と y→x の両方向を確認）
///
/// キーとして存在しない項目は「衝突宣言なし」として扱う。
pub fn conflicts<T: Eq + Hash>(relation: &ConflictRelation<T>, x: &T, y: &T) -> bool {
    relation.conflicts_of(x).contains(y) || relation.conflicts_of(y).contains(x)
}

/// 項目インデックス上の衝突行列
///
/// 項目列の全ペア i < j について `conflicts` を一度だけ評価して保持する。
/// 葉での妥当性判定はこの行列を引くだけになる。
#[derive(Clone, Debug)]
pub struct ConflictMatrix {
    len: usize,
    pairs: U64Set,
}

impl ConflictMatrix {
    pub fn build<T: Eq + Hash>(relation: &ConflictRelation<T>, items: &[T]) -> Self {
        let mut pairs = U64Set::default();
        for i in 0..items.len() {
            for j in (i + 1)..items.len() {
                if conflicts(relation, &items[i], &items[j]) {
                    pairs.insert(pair_key(i, j));
                }
            }
        }
        Self {
            len: items.len(),
            pairs,
        }
    }

    /// 項目数
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 衝突ペアの数
    pub fn conflict_count(&self) -> usize {
        self.pairs.len()
    }

    #[inline(always)]
    pub fn conflicts(&self, i: usize, j: usize) -> bool {
        i != j && self.pairs.contains(&pair_key(i, j))
    }

    /// グループ内に衝突ペアが無いか
    pub fn group_is_valid(&self, group: &[usize]) -> bool {
        for (a, &i) in group.iter().enumerate() {
            for &j in &group[a + 1..] {
                if self.conflicts(i, j) {
                    return false;
                }
            }
        }
        true
    }

    /// 分割全体が妥当か
    pub fn is_valid(&self, groups: &[Vec<usize>]) -> bool {
        groups.iter().all(|g| self.group_is_valid(g))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::universe::linearize;

    fn directional() -> ConflictRelation<u32> {
        ConflictRelation::new().with(1, vec![2, 3]).with(2, vec![3, 4])
    }

    #[test]
    fn conflict_declared_one_way_applies_both_ways() {
        let rel = directional();
        assert!(conflicts(&rel, &2, &4));
        assert!(conflicts(&rel, &4, &2));
        assert!(conflicts(&rel, &3, &1));
    }

    #[test]
    fn undeclared_pairs_do_not_conflict() {
        let rel = directional();
        assert!(!conflicts(&rel, &1, &4));
        assert!(!conflicts(&rel, &3, &4));
        assert!(!conflicts(&rel, &7, &8));
    }

    #[test]
    fn matrix_agrees_with_oracle() {
        let rel = directional();
        let items = linearize(&rel);
        let m = ConflictMatrix::build(&rel, &items);
        assert_eq!(m.len(), 4);
        for i in 0..items.len() {
            for j in 0..items.len() {
                if i == j {
                    continue;
                }
                assert_eq!(m.conflicts(i, j), conflicts(&rel, &items[i], &items[j]));
            }
        }
        assert_eq!(m.conflict_count(), 4);
    }

    #[test]
    fn group_validity() {
        let rel = directional();
        let items = linearize(&rel);
        let m = ConflictMatrix::build(&rel, &items);
        // items = [1, 2, 3, 4]
        assert!(m.group_is_valid(&[0, 3]));
        assert!(!m.group_is_valid(&[1, 3]));
        assert!(m.is_valid(&[vec![0, 3], vec![1], vec![2]]));
        assert!(!m.is_valid(&[vec![0], vec![1, 2, 3]]));
    }

    #[test]
    fn self_listing_does_not_block_anything() {
        let rel = ConflictRelation::new().with('a', vec!['a']);
        let items = linearize(&rel);
        let m = ConflictMatrix::build(&rel, &items);
        assert!(m.is_valid(&[vec![0]]));
        assert_eq!(m.conflict_count(), 0);
    }
}
