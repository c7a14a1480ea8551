// 最小分割探索アプリケーションサービス

pub mod engine;
pub mod event;
pub mod parallel;
pub mod service;
pub mod tracker;

pub use engine::{run_sequential, search, Backtracker};
pub use event::SearchEvent;
pub use parallel::{enumerate_prefixes, run_parallel};
pub use service::{PartitionService, SearchHandle};
pub use tracker::BestTracker;
