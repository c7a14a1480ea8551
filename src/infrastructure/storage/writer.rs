// 結果の書き込み

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::search::SearchReport;

/// 探索レポートを書き込むためのtrait
pub trait ReportWriter: Send {
    /// 単一のレポートを書き込む
    fn write_report(&mut self, report: &SearchReport) -> Result<()>;

    /// 複数のレポートをバッチで書き込む
    fn write_batch(&mut self, reports: &[SearchReport]) -> Result<()> {
        for report in reports {
            self.write_report(report)?;
        }
        Ok(())
    }

    /// 書き込みを完了（フラッシュ）
    fn flush(&mut self) -> Result<()>;

    /// 書き込んだレポート数を取得
    fn count(&self) -> u64;
}

/// 出力フォーマット
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON Lines形式（1行1レポート）
    JsonLines,
    /// JSON配列形式
    JsonArray,
}

/// ファイルへのレポート書き込み実装
pub struct FileReportWriter {
    writer: BufWriter<File>,
    count: u64,
    format: OutputFormat,
    finished: bool,
}

impl FileReportWriter {
    /// 新しいファイルライターを作成
    pub fn new(path: &Path, format: OutputFormat) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("出力ファイルを作成できません: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        if format == OutputFormat::JsonArray {
            writer.write_all(b"[\n")?;
        }
        Ok(Self {
            writer,
            count: 0,
            format,
            finished: false,
        })
    }

    /// JSON Lines形式で作成
    pub fn json_lines(path: &Path) -> Result<Self> {
        Self::new(path, OutputFormat::JsonLines)
    }

    /// JSON配列形式で作成
    pub fn json_array(path: &Path) -> Result<Self> {
        Self::new(path, OutputFormat::JsonArray)
    }
}

impl ReportWriter for FileReportWriter {
    fn write_report(&mut self, report: &SearchReport) -> Result<()> {
        let json = serde_json::to_string(report)?;
        match self.format {
            OutputFormat::JsonLines => {
                writeln!(self.writer, "{}", json)?;
            }
            OutputFormat::JsonArray => {
                if self.count > 0 {
                    writeln!(self.writer, ",")?;
                }
                write!(self.writer, "  {}", json)?;
            }
        }
        self.count += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        // 配列の閉じ括弧は一度だけ
        if self.format == OutputFormat::JsonArray && !self.finished {
            writeln!(self.writer, "\n]")?;
            self.finished = true;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn count(&self) -> u64 {
        self.count
    }
}

impl Drop for FileReportWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// メモリ内書き込み実装（テスト用）
#[derive(Default)]
pub struct MemoryReportWriter {
    reports: Vec<SearchReport>,
}

impl MemoryReportWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[SearchReport] {
        &self.reports
    }
}

impl ReportWriter for MemoryReportWriter {
    fn write_report(&mut self, report: &SearchReport) -> Result<()> {
        self.reports.push(report.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn count(&self) -> u64 {
        self.reports.len() as u64
    }
}
