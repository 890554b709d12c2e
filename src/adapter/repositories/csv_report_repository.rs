//! CSV Report Repository Implementation
//!
//! ReportRepositoryのCSV実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::entities::migration_log::{ErrorEntry, SuccessEntry};
use crate::domain::repositories::report_repository::ReportRepository;

const ERROR_COLUMNS: [&str; 2] = ["status_code", "message"];
const SUCCESS_COLUMNS: [&str; 3] = ["uid", "session_id", "live_course_id"];

/// エラーログの1行
#[derive(Debug, Serialize)]
struct ErrorRow {
    status_code: String,
    message: String,
}

impl From<&ErrorEntry> for ErrorRow {
    fn from(entry: &ErrorEntry) -> Self {
        Self {
            status_code: entry.status.to_string(),
            message: entry.message.clone(),
        }
    }
}

/// 成功ログの1行
#[derive(Debug, Serialize)]
struct SuccessRow {
    uid: String,
    session_id: String,
    live_course_id: String,
}

impl From<&SuccessEntry> for SuccessRow {
    fn from(entry: &SuccessEntry) -> Self {
        Self {
            uid: entry.uid.clone(),
            session_id: entry.session_id.clone(),
            live_course_id: entry.live_course_id.clone(),
        }
    }
}

/// 出力ディレクトリにCSVを書き出すレポートリポジトリ
pub struct CsvReportRepository {
    output_dir: PathBuf,
}

impl CsvReportRepository {
    /// 新しいリポジトリを作成
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// ヘッダーと行を書き出す（同期処理）
    ///
    /// 行が0件でもヘッダーは書き出す
    fn write_sync<T: Serialize>(path: &Path, columns: &[&str], rows: Vec<T>) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create report directory")?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .with_context(|| format!("Failed to create report file: {}", path.display()))?;

        writer
            .write_record(columns)
            .context("Failed to write report header")?;
        for row in rows {
            writer
                .serialize(row)
                .with_context(|| format!("Failed to write report row to {}", path.display()))?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to flush report file: {}", path.display()))?;

        info!("Saved report: {}", path.display());

        Ok(())
    }
}

#[async_trait]
impl ReportRepository for CsvReportRepository {
    async fn write_errors(&self, file_name: &str, entries: &[ErrorEntry]) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        let rows: Vec<ErrorRow> = entries.iter().map(ErrorRow::from).collect();
        let target = path.clone();
        tokio::task::spawn_blocking(move || Self::write_sync(&target, &ERROR_COLUMNS, rows))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;

        Ok(path)
    }

    async fn write_successes(&self, file_name: &str, entries: &[SuccessEntry]) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        let rows: Vec<SuccessRow> = entries.iter().map(SuccessRow::from).collect();
        let target = path.clone();
        tokio::task::spawn_blocking(move || Self::write_sync(&target, &SUCCESS_COLUMNS, rows))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;

        Ok(path)
    }
}
