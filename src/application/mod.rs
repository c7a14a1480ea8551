// アプリケーション層 - 探索の実行と進捗管理

pub mod partition;
pub mod progress;

pub use partition::{PartitionService, SearchEvent, SearchHandle};
pub use progress::{ProgressManager, ProgressStats};
