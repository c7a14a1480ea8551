// 衝突しない最小グループ分け - コマンドライン

use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};

use pigment::domain::sample::{skincare_items, skincare_relation};
use pigment::domain::search::{ItemLimit, LeafBudget, SearchReport, SplitDepth};
use pigment::domain::{scalar_item, validate_known_items};
use pigment::infrastructure::{
    DotRenderer, FileReportWriter, OutputFormat, ParallelConfig, ParallelExecutor, ReportWriter,
};
use pigment::presentation::{format_event, format_partition, format_summary};
use pigment::{logging, vlog, ConflictRelation, PartitionService, SearchConfig, SearchOutcome};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReportFormat {
    /// JSON Lines（1行1レポート）
    Jsonl,
    /// JSON 配列
    Json,
}

impl From<ReportFormat> for OutputFormat {
    fn from(f: ReportFormat) -> Self {
        match f {
            ReportFormat::Jsonl => OutputFormat::JsonLines,
            ReportFormat::Json => OutputFormat::JsonArray,
        }
    }
}

/// 衝突しない項目同士を最小数のグループにまとめる
#[derive(Parser, Debug)]
#[command(name = "pigment", version, about)]
struct Cli {
    /// 衝突関係の JSON（項目 → 衝突項目の配列）。省略時は同梱のスキンケア表
    relation: Option<PathBuf>,

    /// 既知項目の JSON 配列。関係内の項目がすべて含まれるか検証する
    #[arg(long)]
    known_items: Option<PathBuf>,

    /// 探索設定の JSON ファイル（以下のオプションで上書き）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 項目数の上限
    #[arg(long, conflicts_with = "no_limit")]
    max_items: Option<usize>,

    /// 項目数の上限を外す
    #[arg(long)]
    no_limit: bool,

    /// 評価する葉の上限（超えたらそれまでの最良を返す）
    #[arg(long)]
    leaf_budget: Option<u64>,

    /// 並列探索
    #[arg(long)]
    parallel: bool,

    /// 並列探索で枝を分ける先頭項目数
    #[arg(long)]
    split_depth: Option<usize>,

    /// ワーカースレッド数（既定は CPU 数）
    #[arg(long)]
    workers: Option<usize>,

    /// DOT 形式のグラフを書き出す
    #[arg(long)]
    dot: Option<PathBuf>,

    /// 探索レポートを書き出す
    #[arg(long)]
    output: Option<PathBuf>,

    /// レポートの形式
    #[arg(long, value_enum, default_value_t = ReportFormat::Jsonl)]
    format: ReportFormat,

    /// 進捗イベントを標準エラーに表示
    #[arg(long)]
    progress: bool,

    /// 詳細ログの出力先
    #[arg(long)]
    log: Option<PathBuf>,

    /// 詳細ログを有効にする（--log と併用）
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// 設定ファイルとオプションから探索設定を組み立てる
    fn search_config(&self) -> Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::from_json_file(path)?,
            None => SearchConfig::default(),
        };
        if self.no_limit {
            config.max_items = ItemLimit::unbounded();
        } else if let Some(max) = self.max_items {
            config.max_items = ItemLimit::new(max)?;
        }
        if let Some(budget) = self.leaf_budget {
            config.leaf_budget = Some(LeafBudget::new(budget)?);
        }
        if self.parallel {
            config.parallel = true;
        }
        if let Some(depth) = self.split_depth {
            config.split_depth = SplitDepth::new(depth)?;
        }
        Ok(config)
    }

    fn executor(&self) -> Result<ParallelExecutor> {
        match self.workers {
            Some(0) => Err(anyhow!("ワーカー数は1以上である必要があります")),
            Some(n) => Ok(ParallelExecutor::new(ParallelConfig::new(n))),
            None => Ok(ParallelExecutor::default()),
        }
    }
}

fn load_known_items(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("既知項目ファイルを読めません: {}", path.display()))?;
    let values: Vec<serde_json::Value> = serde_json::from_str(&text)
        .with_context(|| format!("既知項目ファイルが不正です: {}", path.display()))?;
    values.into_iter().map(scalar_item).collect()
}

/// 探索を実行（--progress 時は別スレッドで走らせてイベントを表示）
fn run_search(
    service: &PartitionService,
    relation: &ConflictRelation<String>,
    show_progress: bool,
) -> Result<SearchOutcome<String>> {
    if !show_progress {
        return service.partition(relation);
    }
    let (tx, rx) = crossbeam_channel::unbounded();
    thread::scope(|s| {
        let worker = s.spawn(move || service.partition_with_events(relation, &tx));
        for event in rx.iter() {
            eprintln!("{}", format_event(&event));
        }
        worker
            .join()
            .map_err(|_| anyhow!("探索スレッドが異常終了しました"))?
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log {
        logging::init_log_file(path)
            .with_context(|| format!("ログファイルを開けません: {}", path.display()))?;
        if cli.verbose {
            logging::enable_verbose_logging();
        }
    }

    finish(run(&cli))
}

/// 成否にかかわらずログを閉じてから結果を返す
fn finish(result: Result<()>) -> Result<()> {
    if let Err(e) = &result {
        vlog!("エラー終了: {:#}", e);
    }
    logging::close_log_file();
    result
}

fn run(cli: &Cli) -> Result<()> {
    // 入力の読み込みと検証
    let (relation, known) = match &cli.relation {
        Some(path) => (ConflictRelation::from_scalar_json_file(path)?, None),
        None => (skincare_relation(), Some(skincare_items())),
    };
    let known = match &cli.known_items {
        Some(path) => Some(load_known_items(path)?),
        None => known,
    };
    if let Some(known) = &known {
        validate_known_items(&relation, known).context("衝突関係の検証に失敗しました")?;
    }

    let config = cli.search_config().context("探索設定が不正です")?;
    let service = PartitionService::new(config).with_executor(cli.executor()?);

    let outcome = run_search(&service, &relation, cli.progress)?;

    print!("{}", format_partition(&outcome.partition));
    eprintln!("{}", format_summary(&outcome.summary));

    if let Some(path) = &cli.dot {
        DotRenderer::default()
            .write_to(path, &relation, &outcome.partition)
            .context("DOT 出力に失敗しました")?;
    }

    if let Some(path) = &cli.output {
        let mut writer = FileReportWriter::new(path, cli.format.into())?;
        writer.write_report(&SearchReport::from_outcome(&outcome))?;
        writer.flush()?;
    }

    Ok(())
}
