//! # Enrollment Repository Trait
//!
//! 受講記録の読み込みを抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

use crate::domain::entities::enrollment::EnrollmentRecord;

/// 受講記録リポジトリ
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// 入力ファイルが存在するか
    async fn exists(&self, path: &Path) -> bool;

    /// 受講記録を読み込む
    ///
    /// # Arguments
    ///
    /// * `path` - 入力ファイルのパス
    ///
    /// # Returns
    ///
    /// ファイル上の順序を保った受講記録のリスト
    ///
    /// # Errors
    ///
    /// 必須カラムが欠けている場合や、行を解釈できない場合にエラーを返す
    async fn load(&self, path: &Path) -> Result<Vec<EnrollmentRecord>>;
}
