//! # Validate Account Use Case
//!
//! アカウントの存在確認とタイムゾーン取得ユースケース

use log::{info, warn};
use std::sync::Arc;

use crate::domain::errors::MigrationError;
use crate::domain::repositories::lms_repository::{AccountSettings, ApiFailure, LmsRepository};

/// アカウント検証ユースケース
///
/// 失敗は全て致命的エラーとして扱う
pub struct ValidateAccountUseCase<L: LmsRepository> {
    lms_repository: Arc<L>,
}

impl<L: LmsRepository> ValidateAccountUseCase<L> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `lms_repository` - LMSリポジトリ
    pub fn new(lms_repository: Arc<L>) -> Self {
        Self { lms_repository }
    }

    /// サブアカウント設定を取得してアカウントの存在を確認
    ///
    /// # Errors
    ///
    /// 200以外のステータスなら `AccountNotFound`、通信エラーなら `AccountUnreachable`
    pub async fn execute(&self) -> Result<AccountSettings, MigrationError> {
        match self.lms_repository.fetch_account_settings().await {
            Ok(settings) => {
                info!("Bridge account found");
                Ok(settings)
            }
            Err(ApiFailure::Status(status)) => Err(MigrationError::AccountNotFound { status }),
            Err(ApiFailure::Transport(message)) => Err(MigrationError::AccountUnreachable(message)),
            Err(ApiFailure::Malformed(message)) => {
                // 本文が読めなくてもアカウントは存在する。タイムゾーン確認で中断される
                warn!("Could not parse sub account settings: {}", message);
                Ok(AccountSettings::default())
            }
        }
    }

    /// 設定からタイムゾーンを取り出す
    ///
    /// # Errors
    ///
    /// タイムゾーンが無い、または空の場合に `MissingTimezone`
    pub fn require_timezone(settings: &AccountSettings) -> Result<String, MigrationError> {
        settings
            .timezone
            .as_deref()
            .map(str::trim)
            .filter(|tz| !tz.is_empty())
            .map(str::to_string)
            .ok_or(MigrationError::MissingTimezone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::lms_repository::MockLmsRepository;

    fn use_case_with(result: Result<AccountSettings, ApiFailure>) -> ValidateAccountUseCase<MockLmsRepository> {
        let mut mock = MockLmsRepository::new();
        mock.expect_fetch_account_settings()
            .times(1)
            .returning(move || result.clone());
        mock.expect_create_session().never();
        ValidateAccountUseCase::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_validate_account_success() {
        let use_case = use_case_with(Ok(AccountSettings {
            timezone: Some("America/Denver".to_string()),
        }));

        let settings = use_case.execute().await.unwrap();

        assert_eq!(settings.timezone.as_deref(), Some("America/Denver"));
    }

    #[tokio::test]
    async fn test_validate_account_not_found() {
        let use_case = use_case_with(Err(ApiFailure::Status(404)));

        let result = use_case.execute().await;

        assert!(matches!(
            result,
            Err(MigrationError::AccountNotFound { status: 404 })
        ));
    }

    #[tokio::test]
    async fn test_validate_account_unreachable() {
        let use_case = use_case_with(Err(ApiFailure::Transport("dns error".to_string())));

        let result = use_case.execute().await;

        assert!(matches!(result, Err(MigrationError::AccountUnreachable(_))));
    }

    #[tokio::test]
    async fn test_validate_account_malformed_body_has_no_timezone() {
        let use_case = use_case_with(Err(ApiFailure::Malformed("expected value".to_string())));

        let settings = use_case.execute().await.unwrap();

        assert!(matches!(
            ValidateAccountUseCase::<MockLmsRepository>::require_timezone(&settings),
            Err(MigrationError::MissingTimezone)
        ));
    }

    #[test]
    fn test_require_timezone() {
        let settings = AccountSettings {
            timezone: Some(" Europe/Oslo ".to_string()),
        };
        let tz = ValidateAccountUseCase::<MockLmsRepository>::require_timezone(&settings).unwrap();
        assert_eq!(tz, "Europe/Oslo");
    }

    #[test]
    fn test_require_timezone_empty() {
        let settings = AccountSettings {
            timezone: Some("".to_string()),
        };
        assert!(ValidateAccountUseCase::<MockLmsRepository>::require_timezone(&settings).is_err());
        assert!(
            ValidateAccountUseCase::<MockLmsRepository>::require_timezone(&AccountSettings::default())
                .is_err()
        );
    }
}
