// 探索関連のドメインモデル

pub mod config;
pub mod result;

pub use config::{ItemLimit, LeafBudget, SearchConfig, SplitDepth};
pub use result::{bell_number, SearchOutcome, SearchReport, SearchSummary};
