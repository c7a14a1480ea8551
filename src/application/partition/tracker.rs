// 最良結果トラッカー

/// これまでに見つかった最小の妥当な分割（インデックス表現）
///
/// 厳密に小さいときだけ更新する。同数は置き換えないので、
/// 列挙順で最初に見つかった最小分割が残る。
#[derive(Clone, Debug, Default)]
pub struct BestTracker {
    best: Option<Vec<Vec<usize>>>,
}

impl BestTracker {
    pub fn new() -> Self {
        Self { best: None }
    }

    /// 現在の最小グループ数（未記録なら None = +∞）
    pub fn min_group_count(&self) -> Option<usize> {
        self.best.as_ref().map(Vec::len)
    }

    /// このグループ数なら更新になるか
    #[inline(always)]
    pub fn improves(&self, group_count: usize) -> bool {
        self.min_group_count().map_or(true, |min| group_count < min)
    }

    /// 候補を記録する。更新したときだけ複製し true を返す
    pub fn offer(&mut self, candidate: &[Vec<usize>]) -> bool {
        if !self.improves(candidate.len()) {
            return false;
        }
        self.best = Some(candidate.to_vec());
        true
    }

    pub fn best(&self) -> Option<&[Vec<usize>]> {
        self.best.as_deref()
    }

    pub fn into_best(self) -> Option<Vec<Vec<usize>>> {
        self.best
    }

    /// 列挙順に並んだトラッカー群を同じ規則で統合する
    pub fn merge_in_order<I: IntoIterator<Item = BestTracker>>(trackers: I) -> Self {
        let mut merged = Self::new();
        for t in trackers {
            if let Some(best) = t.best {
                if merged.improves(best.len()) {
                    merged.best = Some(best);
                }
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_infinity() {
        let t = BestTracker::new();
        assert_eq!(t.min_group_count(), None);
        assert!(t.improves(usize::MAX));
        assert!(t.best().is_none());
    }

    #[test]
    fn only_strict_improvement_replaces() {
        let mut t = BestTracker::new();
        assert!(t.offer(&[vec![0], vec![1], vec![2]]));
        assert!(t.offer(&[vec![0, 1], vec![2]]));
        assert!(!t.offer(&[vec![0, 2], vec![1]]));
        assert!(!t.offer(&[vec![0], vec![1], vec![2]]));
        assert_eq!(t.best(), Some(&[vec![0, 1], vec![2]][..]));
    }

    #[test]
    fn merge_keeps_first_minimum() {
        let mut a = BestTracker::new();
        a.offer(&[vec![0], vec![1]]);
        let mut b = BestTracker::new();
        b.offer(&[vec![0, 1]]);
        let mut c = BestTracker::new();
        c.offer(&[vec![1, 0]]);
        let empty = BestTracker::new();

        let merged = BestTracker::merge_in_order(vec![a, empty, b, c]);
        assert_eq!(merged.into_best(), Some(vec![vec![0, 1]]));
    }
}
