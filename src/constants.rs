// 探索定数とユーティリティ型定義

use nohash_hasher::BuildNoHashHasher;

/// ====== 探索の既定値 ======
/// 項目数ガードの既定上限（Bell(15) ≈ 1.4e9 葉）
pub const DEFAULT_MAX_ITEMS: usize = 15;
/// 並列分割深さの既定値と上限（Bell(8) = 4140 プレフィックス）
pub const DEFAULT_SPLIT_DEPTH: usize = 4;
pub const MAX_SPLIT_DEPTH: usize = 8;

/// DOT 出力の既定パレット（グループ順に割り当て）
pub const PALETTE: [&str; 8] = [
    "lightblue",
    "lightcoral",
    "palegreen",
    "khaki",
    "plum",
    "lightsalmon",
    "aquamarine",
    "lightgray",
];

// u64 キー専用のノーハッシュ（項目ペアの衝突集合用）
pub type U64Set = std::collections::HashSet<u64, BuildNoHashHasher<u64>>;

/// 項目インデックスのペアを順序なしの u64 キーに詰める
#[inline(always)]
pub fn pair_key(i: usize, j: usize) -> u64 {
    let (lo, hi) = if i < j { (i, j) } else { (j, i) };
    ((lo as u64) << 32) | hi as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_key_is_symmetric() {
        assert_eq!(pair_key(3, 7), pair_key(7, 3));
        assert_ne!(pair_key(3, 7), pair_key(3, 8));
    }
}
