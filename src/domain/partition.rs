// 分割 - 項目をグループに割り当てた結果

use anyhow::{anyhow, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use super::oracle::conflicts;
use super::relation::ConflictRelation;

/// 空でないグループの順序付き列。各項目はちょうど一つのグループに属する
///
/// JSON からの復元は `try_new` と同じ検査を通る。
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Partition<T> {
    groups: Vec<Vec<T>>,
}

impl<T> Partition<T> {
    /// 検査なしで構築する（空グループや重複項目もそのまま保持する）
    pub fn new(groups: Vec<Vec<T>>) -> Self {
        Self { groups }
    }

    /// 全項目を単独グループにした分割（常に妥当）
    pub fn singletons(items: Vec<T>) -> Self {
        Self {
            groups: items.into_iter().map(|item| vec![item]).collect(),
        }
    }

    /// インデックス表現の分割を項目に戻す
    pub fn from_indices(groups: &[Vec<usize>], items: &[T]) -> Self
    where
        T: Clone,
    {
        Self {
            groups: groups
                .iter()
                .map(|g| g.iter().map(|&i| items[i].clone()).collect())
                .collect(),
        }
    }

    pub fn groups(&self) -> &[Vec<T>] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<Vec<T>> {
        self.groups
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// グループ順・グループ内順に全項目を走査
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.groups.iter().flatten()
    }

    pub fn item_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }
}

impl<T: Eq + Hash> Partition<T> {
    /// 空グループと重複項目を拒否して構築する
    pub fn try_new(groups: Vec<Vec<T>>) -> Result<Self> {
        if let Some(gi) = groups.iter().position(Vec::is_empty) {
            return Err(anyhow!("グループ {} が空です", gi));
        }
        let mut seen = HashSet::new();
        for (gi, group) in groups.iter().enumerate() {
            if group.iter().any(|item| !seen.insert(item)) {
                return Err(anyhow!("グループ {} に他と重複する項目があります", gi));
            }
        }
        Ok(Self { groups })
    }

    /// どのグループにも衝突ペアが無いか（衝突関係を直接参照）
    pub fn is_valid(&self, relation: &ConflictRelation<T>) -> bool {
        self.groups.iter().all(|group| {
            group.iter().enumerate().all(|(a, x)| {
                group[a + 1..].iter().all(|y| !conflicts(relation, x, y))
            })
        })
    }

    /// 項目全体をちょうど一度ずつ覆っているか（空グループも不可）
    pub fn covers(&self, universe: &[T]) -> bool {
        if self.groups.iter().any(Vec::is_empty) || self.item_count() != universe.len() {
            return false;
        }
        let mut seen = HashSet::with_capacity(universe.len());
        for item in self.items() {
            if !seen.insert(item) {
                return false;
            }
        }
        universe.iter().all(|item| seen.contains(item))
    }

    /// 項目が属するグループ番号
    pub fn group_of(&self, item: &T) -> Option<usize> {
        self.groups.iter().position(|g| g.contains(item))
    }
}

impl<'de, T> Deserialize<'de> for Partition<T>
where
    T: Deserialize<'de> + Eq + Hash,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let groups = Vec::<Vec<T>>::deserialize(deserializer)?;
        Partition::try_new(groups).map_err(serde::de::Error::custom)
    }
}

impl<T: fmt::Display> fmt::Display for Partition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (gi, group) in self.groups.iter().enumerate() {
            if gi > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (ii, item) in group.iter().enumerate() {
                if ii > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", item)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}
