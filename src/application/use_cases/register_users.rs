//! # Register Users Use Case
//!
//! ユーザーのセッション登録ユースケース

use log::{debug, info, warn};
use std::sync::Arc;

use crate::application::dto::migration_context::MigrationContext;
use crate::domain::entities::enrollment::EnrollmentRecord;
use crate::domain::entities::migration_log::{LogStatus, SuccessEntry};
use crate::domain::repositories::lms_repository::{ApiFailure, LmsRepository};

/// 登録結果のサマリー
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationSummary {
    /// 登録に成功した行数
    pub registered: usize,
    /// 失敗した行数
    pub failed: usize,
}

/// 1行分の登録結果
#[derive(Debug, Clone, PartialEq, Eq)]
enum RowOutcome {
    Registered(SuccessEntry),
    Failed { status: LogStatus, message: String },
}

/// ユーザー登録ユースケース
///
/// 各行を元の順序で1回だけ処理する。どの行の失敗もバッチを中断しない
pub struct RegisterUsersUseCase<L: LmsRepository> {
    lms_repository: Arc<L>,
}

impl<L: LmsRepository> RegisterUsersUseCase<L> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `lms_repository` - LMSリポジトリ
    pub fn new(lms_repository: Arc<L>) -> Self {
        Self { lms_repository }
    }

    /// 全行のユーザーをセッションに登録
    ///
    /// # Arguments
    ///
    /// * `records` - 受講記録（元の順序）
    /// * `context` - 実行コンテキスト（ログに追記する）
    pub async fn execute(
        &self,
        records: &[EnrollmentRecord],
        context: &mut MigrationContext,
    ) -> RegistrationSummary {
        let mut summary = RegistrationSummary::default();

        for record in records {
            match self.register_row(record, context).await {
                RowOutcome::Registered(entry) => {
                    summary.registered += 1;
                    context.log.push_success(entry);
                }
                RowOutcome::Failed { status, message } => {
                    summary.failed += 1;
                    warn!("Line {}: {}", record.line, message);
                    context.log.push_error(status, message);
                }
            }
        }

        info!(
            "Registrations: {} succeeded, {} failed",
            summary.registered, summary.failed
        );

        summary
    }

    async fn register_row(&self, record: &EnrollmentRecord, context: &MigrationContext) -> RowOutcome {
        let uid = &record.uid;

        let user_id = match self.lms_repository.find_user_id(uid).await {
            Ok(user_id) => user_id,
            Err(ApiFailure::Status(status)) => {
                return RowOutcome::Failed {
                    status: LogStatus::Http(status),
                    message: format!("The API call could not return a user with the UID: {}", uid),
                };
            }
            Err(failure) => {
                debug!("User lookup for {} failed: {}", uid, failure);
                return RowOutcome::Failed {
                    status: failure.log_status(),
                    message: format!(
                        "Something went wrong when trying to get the user {} from Bridge",
                        uid
                    ),
                };
            }
        };

        let key = record.session_key();
        let Some(session) = context.sessions.get(&key) else {
            return RowOutcome::Failed {
                status: LogStatus::Empty,
                message: format!(
                    "No session exists for course: {}. Date: {}; could not register the user {}",
                    key.live_course_id, key.completed_at, uid
                ),
            };
        };
        if !session.is_published() {
            return RowOutcome::Failed {
                status: LogStatus::Empty,
                message: format!(
                    "The publish session call failed for session_id: {}",
                    session.session_id
                ),
            };
        }

        let session_id = &session.session_id;
        println!(
            "  Session ID:{} - Uniq:{} - User: {}",
            session_id, key, uid
        );

        match self.lms_repository.register_user(session_id, &user_id).await {
            Ok(()) => RowOutcome::Registered(SuccessEntry {
                uid: uid.clone(),
                session_id: session_id.clone(),
                live_course_id: record.live_course_id.clone(),
            }),
            Err(ApiFailure::Status(status)) => RowOutcome::Failed {
                status: LogStatus::Http(status),
                message: format!(
                    "The API call could not register the user {} in session {}",
                    uid, session_id
                ),
            },
            Err(failure) => RowOutcome::Failed {
                status: failure.log_status(),
                message: format!(
                    "Something went wrong when trying to register the user {} in session {}",
                    uid, session_id
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::enrollment::SessionKey;
    use crate::domain::repositories::lms_repository::MockLmsRepository;

    fn published_context() -> MigrationContext {
        let mut context = MigrationContext::new();
        let key = SessionKey::new("10", "2021-01-05");
        context.sessions.record_created(key.clone(), "555");
        context.sessions.mark_published(&key);
        context
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut mock = MockLmsRepository::new();
        mock.expect_find_user_id()
            .times(2)
            .returning(|_| Ok("42".to_string()));
        mock.expect_register_user()
            .times(2)
            .returning(|_, _| Ok(()));

        let use_case = RegisterUsersUseCase::new(Arc::new(mock));
        let mut context = published_context();
        let records = vec![
            EnrollmentRecord::new("alice", "10", "2021-01-05"),
            EnrollmentRecord::new("bob", "10", "2021-01-05"),
        ];

        let summary = use_case.execute(&records, &mut context).await;

        assert_eq!(summary, RegistrationSummary { registered: 2, failed: 0 });
        assert_eq!(context.log.successes().len(), 2);
        assert_eq!(
            context.log.successes()[1],
            SuccessEntry {
                uid: "bob".to_string(),
                session_id: "555".to_string(),
                live_course_id: "10".to_string(),
            }
        );
        assert!(context.log.errors().is_empty());
    }

    #[tokio::test]
    async fn test_user_lookup_failure_skips_registration() {
        let mut mock = MockLmsRepository::new();
        mock.expect_find_user_id()
            .times(1)
            .returning(|_| Err(ApiFailure::Status(404)));
        mock.expect_register_user().never();

        let use_case = RegisterUsersUseCase::new(Arc::new(mock));
        let mut context = published_context();

        let summary = use_case
            .execute(&[EnrollmentRecord::new("ghost", "10", "2021-01-05")], &mut context)
            .await;

        assert_eq!(summary.failed, 1);
        assert_eq!(context.log.errors().len(), 1);
        assert_eq!(context.log.errors()[0].status, LogStatus::Http(404));
        assert!(context.log.errors()[0].message.contains("ghost"));
        assert!(context.log.successes().is_empty());
    }

    #[tokio::test]
    async fn test_user_lookup_malformed_is_unknown() {
        let mut mock = MockLmsRepository::new();
        mock.expect_find_user_id()
            .times(1)
            .returning(|_| Err(ApiFailure::Malformed("no users".to_string())));
        mock.expect_register_user().never();

        let use_case = RegisterUsersUseCase::new(Arc::new(mock));
        let mut context = published_context();

        use_case
            .execute(&[EnrollmentRecord::new("jdoe", "10", "2021-01-05")], &mut context)
            .await;

        assert_eq!(context.log.errors()[0].status, LogStatus::Unknown);
        assert_eq!(
            context.log.errors()[0].message,
            "Something went wrong when trying to get the user jdoe from Bridge"
        );
    }

    #[tokio::test]
    async fn test_missing_session() {
        let mut mock = MockLmsRepository::new();
        mock.expect_find_user_id()
            .times(1)
            .returning(|_| Ok("42".to_string()));
        mock.expect_register_user().never();

        let use_case = RegisterUsersUseCase::new(Arc::new(mock));
        let mut context = published_context();

        let summary = use_case
            .execute(&[EnrollmentRecord::new("jdoe", "99", "2021-01-05")], &mut context)
            .await;

        assert_eq!(summary.failed, 1);
        assert_eq!(context.log.errors()[0].status, LogStatus::Empty);
        assert!(context.log.errors()[0].message.contains("course: 99"));
    }

    #[tokio::test]
    async fn test_unpublished_session() {
        let mut mock = MockLmsRepository::new();
        mock.expect_find_user_id()
            .times(1)
            .returning(|_| Ok("42".to_string()));
        mock.expect_register_user().never();

        let use_case = RegisterUsersUseCase::new(Arc::new(mock));
        let mut context = MigrationContext::new();
        context
            .sessions
            .record_created(SessionKey::new("10", "2021-01-05"), "555");

        use_case
            .execute(&[EnrollmentRecord::new("jdoe", "10", "2021-01-05")], &mut context)
            .await;

        assert_eq!(context.log.errors().len(), 1);
        assert_eq!(
            context.log.errors()[0].message,
            "The publish session call failed for session_id: 555"
        );
        assert!(context.log.successes().is_empty());
    }

    #[tokio::test]
    async fn test_registration_failure() {
        let mut mock = MockLmsRepository::new();
        mock.expect_find_user_id()
            .times(1)
            .returning(|_| Ok("42".to_string()));
        mock.expect_register_user()
            .times(1)
            .returning(|_, _| Err(ApiFailure::Status(400)));

        let use_case = RegisterUsersUseCase::new(Arc::new(mock));
        let mut context = published_context();

        let summary = use_case
            .execute(&[EnrollmentRecord::new("jdoe", "10", "2021-01-05")], &mut context)
            .await;

        assert_eq!(summary, RegistrationSummary { registered: 0, failed: 1 });
        assert_eq!(context.log.errors()[0].status, LogStatus::Http(400));
        assert_eq!(
            context.log.errors()[0].message,
            "The API call could not register the user jdoe in session 555"
        );
    }
}
