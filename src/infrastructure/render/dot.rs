// DOT 形式の出力 - 項目をグループ色のノード、衝突を辺として描く

use anyhow::{anyhow, Context, Result};
use std::fmt::{Display, Write as _};
use std::hash::Hash;
use std::path::Path;

use crate::constants::{pair_key, PALETTE, U64Set};
use crate::domain::{linearize, ConflictRelation, Partition};

/// DOT レンダラー
#[derive(Clone, Debug)]
pub struct DotRenderer {
    palette: Vec<String>,
}

impl DotRenderer {
    /// 独自パレットで作成
    pub fn with_palette(palette: Vec<String>) -> Result<Self> {
        if palette.is_empty() {
            return Err(anyhow!("パレットが空です"));
        }
        Ok(Self { palette })
    }

    pub fn palette(&self) -> &[String] {
        &self.palette
    }

    /// グラフ記述を生成する
    ///
    /// グループ数がパレットの色数を超える場合は切り詰めずにエラーを返す。
    pub fn render<T>(&self, relation: &ConflictRelation<T>, partition: &Partition<T>) -> Result<String>
    where
        T: Clone + Eq + Hash + Display,
    {
        if partition.group_count() > self.palette.len() {
            return Err(anyhow!(
                "パレットの色が足りません: {} グループに対して {} 色",
                partition.group_count(),
                self.palette.len()
            ));
        }

        let mut dot = String::new();
        dot.push_str("graph conflicts {\n");
        dot.push_str("  node [style=filled];\n\n");

        // グループごとに同じ塗り色
        for (group, color) in partition.groups().iter().zip(&self.palette) {
            for item in group {
                let _ = writeln!(
                    dot,
                    "  \"{}\" [fillcolor=\"{}\"];",
                    Self::dot_escape(&item.to_string()),
                    color
                );
            }
        }
        dot.push('\n');

        // 衝突辺（両方向に宣言されたペアは一本だけ）
        let items = linearize(relation);
        let index = |x: &T| items.iter().position(|i| i == x);
        let mut drawn = U64Set::default();
        for (item, conflicts) in relation.iter() {
            for other in conflicts {
                let (Some(a), Some(b)) = (index(item), index(other)) else {
                    continue;
                };
                if a == b || !drawn.insert(pair_key(a, b)) {
                    continue;
                }
                let _ = writeln!(
                    dot,
                    "  \"{}\" -- \"{}\";",
                    Self::dot_escape(&item.to_string()),
                    Self::dot_escape(&other.to_string())
                );
            }
        }

        dot.push_str("}\n");
        Ok(dot)
    }

    /// ファイルへ書き出す
    pub fn write_to<T>(
        &self,
        path: &Path,
        relation: &ConflictRelation<T>,
        partition: &Partition<T>,
    ) -> Result<()>
    where
        T: Clone + Eq + Hash + Display,
    {
        let dot = self.render(relation, partition)?;
        std::fs::write(path, dot)
            .with_context(|| format!("DOT ファイルを書き込めません: {}", path.display()))
    }

    fn dot_escape(s: &str) -> String {
        s.replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
    }
}

impl Default for DotRenderer {
    fn default() -> Self {
        Self {
            palette: PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}
