// インフラ層 - 並列実行・描画・永続化の技術的実装

pub mod executor;
pub mod render;
pub mod storage;

pub use executor::{ParallelConfig, ParallelExecutor};
pub use render::DotRenderer;
pub use storage::{FileReportWriter, MemoryReportWriter, OutputFormat, ReportWriter};
