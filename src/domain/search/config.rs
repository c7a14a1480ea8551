// 探索設定のValue Objects

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::result::bell_number;
use crate::constants::{DEFAULT_MAX_ITEMS, DEFAULT_SPLIT_DEPTH, MAX_SPLIT_DEPTH};

/// 項目数の上限ガード（None なら無制限）
///
/// 探索葉数は Bell(n) で増えるため、大きな入力は黙って切り詰めず
/// エラーとして報告する。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemLimit(Option<usize>);

impl ItemLimit {
    pub fn new(max_items: usize) -> Result<Self> {
        if max_items == 0 {
            return Err(anyhow!("項目数の上限は1以上である必要があります"));
        }
        Ok(Self(Some(max_items)))
    }

    pub fn unbounded() -> Self {
        Self(None)
    }

    pub fn get(&self) -> Option<usize> {
        self.0
    }

    /// 項目数が上限内か検証
    pub fn check(&self, item_count: usize) -> Result<()> {
        match self.0 {
            Some(max) if item_count > max => Err(anyhow!(
                "項目数 {} が上限 {} を超えています（探索葉数 Bell({}) = {}）",
                item_count,
                max,
                item_count,
                bell_number(item_count)
            )),
            _ => Ok(()),
        }
    }
}

impl Default for ItemLimit {
    fn default() -> Self {
        Self(Some(DEFAULT_MAX_ITEMS))
    }
}

/// 評価する葉の上限数
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafBudget(u64);

impl LeafBudget {
    pub fn new(leaves: u64) -> Result<Self> {
        if leaves == 0 {
            return Err(anyhow!("葉の予算は1以上である必要があります"));
        }
        Ok(Self(leaves))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

/// 並列探索で分割する先頭項目数 (1 ~ MAX_SPLIT_DEPTH)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitDepth(usize);

impl SplitDepth {
    pub fn new(depth: usize) -> Result<Self> {
        if depth == 0 {
            return Err(anyhow!("分割深さは1以上である必要があります"));
        }
        if depth > MAX_SPLIT_DEPTH {
            return Err(anyhow!(
                "分割深さが大きすぎます: {}（上限 {}）",
                depth,
                MAX_SPLIT_DEPTH
            ));
        }
        Ok(Self(depth))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for SplitDepth {
    fn default() -> Self {
        Self(DEFAULT_SPLIT_DEPTH)
    }
}

/// 探索設定のValue Object
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_items: ItemLimit,
    pub leaf_budget: Option<LeafBudget>,
    pub parallel: bool,
    pub split_depth: SplitDepth,
}

impl SearchConfig {
    /// JSON から読み込んだ設定は Value Object の検証を通らないため再検証する
    pub fn validate(&self) -> Result<()> {
        if let Some(max) = self.max_items.get() {
            ItemLimit::new(max)?;
        }
        if let Some(budget) = self.leaf_budget {
            LeafBudget::new(budget.get())?;
        }
        SplitDepth::new(self.split_depth.get())?;
        Ok(())
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("探索設定の JSON を解析できません")?;
        config.validate().context("探索設定が不正です")?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("設定ファイルを読めません: {}", path.display()))?;
        Self::from_json_str(&text)
    }
}
