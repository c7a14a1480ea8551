// 衝突関係 - 項目ごとの「同じグループに入れてはいけない項目」リスト

use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::hash::Hash;
use std::path::Path;

/// 衝突関係（定義順を保持する）
///
/// 保存上は有向（A が B を挙げても B が A を挙げるとは限らない）だが、
/// 妥当性判定では常に両方向を見る。値としてのみ現れる項目も分割対象になる。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "T: Serialize + Eq + Hash",
    deserialize = "T: Deserialize<'de> + Eq + Hash"
))]
pub struct ConflictRelation<T: Eq + Hash> {
    entries: IndexMap<T, Vec<T>>,
}

impl<T: Eq + Hash> ConflictRelation<T> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// 衝突リストを登録する（既存キーは位置を保ったままリストを置き換える）
    pub fn insert(&mut self, item: T, conflicts: Vec<T>) {
        self.entries.insert(item, conflicts);
    }

    /// ビルダー形式の登録
    pub fn with(mut self, item: T, conflicts: Vec<T>) -> Self {
        self.insert(item, conflicts);
        self
    }

    /// 項目が宣言した衝突リスト（キーとして存在しなければ空）
    pub fn conflicts_of(&self, item: &T) -> &[T] {
        self.entries.get(item).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 定義順に (キー, 衝突リスト) を走査
    pub fn iter(&self) -> impl Iterator<Item = (&T, &[T])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// キーの数（値としてのみ現れる項目は含まない）
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 衝突が一つも宣言されていないか
    pub fn declares_no_conflicts(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }
}

impl<T: Eq + Hash + DeserializeOwned> ConflictRelation<T> {
    /// JSON オブジェクト（項目 → 衝突項目の配列）から構築。記述順を保持する
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("衝突関係の JSON を解析できません")
    }

    /// JSON ファイルから読み込む
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("衝突関係ファイルを読めません: {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("衝突関係ファイルが不正です: {}", path.display()))
    }
}

/// JSON のスカラー値を項目名に変換する（文字列はそのまま、数値は表記どおり）
pub fn scalar_item(value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(anyhow!("項目は文字列か数値である必要があります: {}", other)),
    }
}

impl ConflictRelation<String> {
    /// 文字列・数値の混在を許して読み込む（`{"1": [2, 3]}` の 2, 3 は "2", "3" になる）
    pub fn from_scalar_json_str(text: &str) -> Result<Self> {
        let raw: IndexMap<String, Vec<Value>> =
            serde_json::from_str(text).context("衝突関係の JSON を解析できません")?;
        raw.into_iter()
            .map(|(item, list)| -> Result<(String, Vec<String>)> {
                let list = list
                    .into_iter()
                    .map(scalar_item)
                    .collect::<Result<Vec<_>>>()
                    .with_context(|| format!("項目 {} の衝突リストが不正です", item))?;
                Ok((item, list))
            })
            .collect()
    }

    /// JSON ファイルから文字列・数値混在で読み込む
    pub fn from_scalar_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("衝突関係ファイルを読めません: {}", path.display()))?;
        Self::from_scalar_json_str(&text)
            .with_context(|| format!("衝突関係ファイルが不正です: {}", path.display()))
    }
}

impl<T: Eq + Hash> Default for ConflictRelation<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash> FromIterator<(T, Vec<T>)> for ConflictRelation<T> {
    fn from_iter<I: IntoIterator<Item = (T, Vec<T>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
