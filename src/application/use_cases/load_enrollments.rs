//! # Load Enrollments Use Case
//!
//! 受講記録の読み込みとセッションキー導出ユースケース

use anyhow::Result;
use log::info;
use std::path::Path;
use std::sync::Arc;

use crate::application::dto::enrollment_plan::EnrollmentPlan;
use crate::domain::errors::MigrationError;
use crate::domain::repositories::enrollment_repository::EnrollmentRepository;

/// 受講記録読み込みユースケース
pub struct LoadEnrollmentsUseCase<E: EnrollmentRepository> {
    enrollment_repository: Arc<E>,
}

impl<E: EnrollmentRepository> LoadEnrollmentsUseCase<E> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `enrollment_repository` - 受講記録リポジトリ
    pub fn new(enrollment_repository: Arc<E>) -> Self {
        Self {
            enrollment_repository,
        }
    }

    /// 入力ファイルの存在を確認
    ///
    /// # Errors
    ///
    /// ファイルが無い場合に `FileNotFound`
    pub async fn ensure_exists(&self, path: &Path) -> Result<(), MigrationError> {
        if self.enrollment_repository.exists(path).await {
            Ok(())
        } else {
            Err(MigrationError::FileNotFound(path.to_path_buf()))
        }
    }

    /// 受講記録を読み込み、一意なセッションキーを導出
    ///
    /// # Errors
    ///
    /// 読み込みに失敗した場合にエラーを返す
    pub async fn execute(&self, path: &Path) -> Result<EnrollmentPlan> {
        let records = self.enrollment_repository.load(path).await?;
        let plan = EnrollmentPlan::from_records(records);

        info!(
            "Loaded {} enrollment rows ({} unique sessions) from {}",
            plan.records.len(),
            plan.session_keys.len(),
            path.display()
        );

        Ok(plan)
    }
}
