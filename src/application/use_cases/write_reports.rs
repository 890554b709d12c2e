//! # Write Reports Use Case
//!
//! エラー/成功ログの書き出しユースケース

use anyhow::Result;
use chrono::NaiveDate;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::entities::migration_log::MigrationLog;
use crate::domain::repositories::report_repository::ReportRepository;

/// 書き出したレポートのパス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub errors: PathBuf,
    pub successes: PathBuf,
}

/// `{domain}_ILT_HDM_errors_{YYYY-MM-DD}.csv`
pub fn error_report_name(domain: &str, date: NaiveDate) -> String {
    format!("{}_ILT_HDM_errors_{}.csv", domain, date.format("%Y-%m-%d"))
}

/// `{domain}_ILT_HDM_return_{YYYY-MM-DD}.csv`
pub fn success_report_name(domain: &str, date: NaiveDate) -> String {
    format!("{}_ILT_HDM_return_{}.csv", domain, date.format("%Y-%m-%d"))
}

/// レポート書き出しユースケース
pub struct WriteReportsUseCase<R: ReportRepository> {
    report_repository: Arc<R>,
}

impl<R: ReportRepository> WriteReportsUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `report_repository` - レポートリポジトリ
    pub fn new(report_repository: Arc<R>) -> Self {
        Self { report_repository }
    }

    /// エラーログと成功ログを書き出す
    ///
    /// # Arguments
    ///
    /// * `domain` - Bridgeのドメイン（ファイル名に使う）
    /// * `log` - 移行ログ
    /// * `date` - 実行日
    ///
    /// # Errors
    ///
    /// どちらかのファイルの書き出しに失敗した場合にエラーを返す
    pub async fn execute(&self, domain: &str, log: &MigrationLog, date: NaiveDate) -> Result<ReportPaths> {
        let errors = self
            .report_repository
            .write_errors(&error_report_name(domain, date), log.errors())
            .await?;
        let successes = self
            .report_repository
            .write_successes(&success_report_name(domain, date), log.successes())
            .await?;

        info!(
            "Wrote {} error rows to {} and {} success rows to {}",
            log.errors().len(),
            errors.display(),
            log.successes().len(),
            successes.display()
        );

        Ok(ReportPaths { errors, successes })
    }
}
