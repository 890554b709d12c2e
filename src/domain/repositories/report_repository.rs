//! # Report Repository Trait
//!
//! 実行結果レポートの書き出しを抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::entities::migration_log::{ErrorEntry, SuccessEntry};

/// レポートリポジトリ
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// エラーログを書き出す
    ///
    /// # Returns
    ///
    /// 書き出したファイルのパス
    async fn write_errors(&self, file_name: &str, entries: &[ErrorEntry]) -> Result<PathBuf>;

    /// 成功ログを書き出す
    ///
    /// # Returns
    ///
    /// 書き出したファイルのパス
    async fn write_successes(&self, file_name: &str, entries: &[SuccessEntry]) -> Result<PathBuf>;
}
