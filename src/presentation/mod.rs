// プレゼンテーション層 - 結果のテキスト表示

pub mod format;

pub use format::{format_event, format_partition, format_summary};
