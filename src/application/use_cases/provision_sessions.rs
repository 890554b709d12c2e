//! # Provision Sessions Use Case
//!
//! セッションの作成と公開ユースケース

use log::{info, warn};
use std::sync::Arc;

use crate::application::dto::migration_context::MigrationContext;
use crate::domain::entities::enrollment::SessionKey;
use crate::domain::entities::migration_log::LogStatus;
use crate::domain::repositories::lms_repository::{ApiFailure, LmsRepository};
use crate::domain::services::session_planner::SessionPlanner;

/// セッション作成結果のサマリー
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisioningSummary {
    /// 作成されたセッション数
    pub created: usize,
    /// 公開されたセッション数
    pub published: usize,
    /// 作成または公開に失敗したセッション数
    pub failed: usize,
}

/// セッション作成ユースケース
///
/// 一意なセッションキーごとに作成と公開を1回ずつ試みる。失敗はログに記録して次へ進む
pub struct ProvisionSessionsUseCase<L: LmsRepository> {
    lms_repository: Arc<L>,
}

impl<L: LmsRepository> ProvisionSessionsUseCase<L> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `lms_repository` - LMSリポジトリ
    pub fn new(lms_repository: Arc<L>) -> Self {
        Self { lms_repository }
    }

    /// セッションを作成して公開する
    ///
    /// # Arguments
    ///
    /// * `keys` - 一意なセッションキー
    /// * `timezone` - アカウントのタイムゾーン
    /// * `context` - 実行コンテキスト（セッション表とログを更新する）
    pub async fn execute(
        &self,
        keys: &[SessionKey],
        timezone: &str,
        context: &mut MigrationContext,
    ) -> ProvisioningSummary {
        let mut summary = ProvisioningSummary::default();

        for key in keys {
            let Some(session_id) = self.create(key, timezone, context).await else {
                summary.failed += 1;
                continue;
            };
            summary.created += 1;
            println!(
                "✓ Session created for {}-{}",
                key.live_course_id, key.completed_at
            );

            if self.publish(key, &session_id, context).await {
                summary.published += 1;
                println!(
                    "✓ Session published for {}-{}",
                    key.live_course_id, key.completed_at
                );
            } else {
                summary.failed += 1;
            }
        }

        info!(
            "Provisioned sessions: {} created, {} published, {} failed",
            summary.created, summary.published, summary.failed
        );

        summary
    }

    async fn create(
        &self,
        key: &SessionKey,
        timezone: &str,
        context: &mut MigrationContext,
    ) -> Option<String> {
        let Some(window) = SessionPlanner::session_window(key, timezone) else {
            warn!("Invalid completion date for session {}", key);
            context.log.push_error(
                LogStatus::Empty,
                format!(
                    "The completion date is not a valid YYYY-MM-DD date for course: {}. Date: {}",
                    key.live_course_id, key.completed_at
                ),
            );
            return None;
        };

        match self
            .lms_repository
            .create_session(&key.live_course_id, &window)
            .await
        {
            Ok(session_id) => {
                context.sessions.record_created(key.clone(), session_id.clone());
                Some(session_id)
            }
            Err(failure) => {
                warn!("Failed to create session {}: {}", key, failure);
                let message = match failure {
                    ApiFailure::Status(_) => format!(
                        "The API call failed to create a session for course: {}. Date: {}",
                        key.live_course_id, key.completed_at
                    ),
                    _ => format!(
                        "Something went wrong when trying to create the session for course: {}. Date: {}",
                        key.live_course_id, key.completed_at
                    ),
                };
                context.log.push_error(failure.log_status(), message);
                None
            }
        }
    }

    async fn publish(&self, key: &SessionKey, session_id: &str, context: &mut MigrationContext) -> bool {
        match self
            .lms_repository
            .publish_session(&key.live_course_id, session_id)
            .await
        {
            Ok(()) => context.sessions.mark_published(key),
            Err(failure) => {
                warn!("Failed to publish session {} ({}): {}", key, session_id, failure);
                let message = match failure {
                    ApiFailure::Status(_) => format!(
                        "The API call failed to publish a session for course: {}. Date: {}",
                        key.live_course_id, key.completed_at
                    ),
                    _ => format!(
                        "Something went wrong when trying to publish the session for course: {}. Date: {}",
                        key.live_course_id, key.completed_at
                    ),
                };
                context.log.push_error(failure.log_status(), message);
                false
            }
        }
    }
}
