// テキスト表示 - 分割・サマリー・イベントの整形

use std::fmt::Display;

use crate::application::SearchEvent;
use crate::domain::search::SearchSummary;
use crate::domain::Partition;

/// 1行1グループで分割を整形し、最後にグループ数を添える
pub fn format_partition<T: Display>(partition: &Partition<T>) -> String {
    let mut out = String::new();
    for group in partition.groups() {
        let items: Vec<String> = group.iter().map(|item| item.to_string()).collect();
        out.push('[');
        out.push_str(&items.join(", "));
        out.push_str("]\n");
    }
    out.push_str(&format!("groups: {}\n", partition.group_count()));
    out
}

/// 探索統計の整形
pub fn format_summary(summary: &SearchSummary) -> String {
    format!(
        "項目 {} / 衝突ペア {} / 葉 {} / {}（{}）/ {:.3}s / {:.0} 葉/秒{}",
        summary.item_count,
        summary.conflict_pairs,
        summary.leaves_visited,
        summary.total_leaves,
        if summary.complete { "完了" } else { "打ち切り" },
        summary.elapsed_seconds,
        summary.leaves_per_second,
        if summary.parallel { " / 並列" } else { "" }
    )
}

/// 進捗イベントの1行表示
pub fn format_event(event: &SearchEvent) -> String {
    match event {
        SearchEvent::Started {
            item_count,
            total_leaves,
            parallel,
        } => format!(
            "探索開始: 項目 {} / 総葉数 {}{}",
            item_count,
            total_leaves,
            if *parallel { "（並列）" } else { "" }
        ),
        SearchEvent::Improved {
            group_count,
            leaves_visited,
        } => format!("最良更新: {} グループ（葉 {} 個目）", group_count, leaves_visited),
        SearchEvent::Log(message) => message.clone(),
        SearchEvent::Finished(summary) => format!("探索終了: {}", format_summary(summary)),
    }
}
