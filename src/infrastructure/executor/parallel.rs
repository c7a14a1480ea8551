// 並列実行管理

use anyhow::{anyhow, Context, Result};

/// 並列実行設定
#[derive(Clone, Debug)]
pub struct ParallelConfig {
    /// ワーカースレッド数
    pub num_workers: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get(),
        }
    }
}

impl ParallelConfig {
    pub fn new(num_workers: usize) -> Self {
        Self { num_workers }
    }
}

/// 並列実行エグゼキューター（rayon スレッドプール）
pub struct ParallelExecutor {
    config: ParallelConfig,
}

impl ParallelExecutor {
    pub fn new(config: ParallelConfig) -> Self {
        Self { config }
    }

    /// ワーカー数を取得
    pub fn num_workers(&self) -> usize {
        self.config.num_workers
    }

    /// 設定を取得
    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }

    /// 専用プール上で処理を実行する
    pub fn install<R, F>(&self, op: F) -> Result<R>
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        if self.config.num_workers == 0 {
            return Err(anyhow!("ワーカー数は1以上である必要があります"));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.num_workers)
            .thread_name(|i| format!("pigment-worker-{}", i))
            .build()
            .context("スレッドプールを作成できません")?;
        Ok(pool.install(op))
    }
}

impl Default for ParallelExecutor {
    fn default() -> Self {
        Self::new(ParallelConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn parallel_config_default() {
        let config = ParallelConfig::default();
        assert!(config.num_workers > 0);
    }

    #[test]
    fn install_runs_on_pool_of_requested_size() {
        let executor = ParallelExecutor::new(ParallelConfig::new(3));
        let threads = executor.install(rayon::current_num_threads).unwrap();
        assert_eq!(threads, 3);
    }

    #[test]
    fn install_preserves_order() {
        let executor = ParallelExecutor::new(ParallelConfig::new(4));
        let out: Vec<i32> = executor
            .install(|| (0..100).into_par_iter().map(|x| x * 2).collect())
            .unwrap();
        assert_eq!(out, (0..100).map(|x| x * 2).collect::<Vec<_>>());
    }

    #[test]
    fn zero_workers_rejected() {
        let executor = ParallelExecutor::new(ParallelConfig::new(0));
        assert!(executor.install(|| 1).is_err());
    }
}
