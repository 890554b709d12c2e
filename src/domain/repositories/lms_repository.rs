//! # LMS Repository Trait
//!
//! Bridge REST API 呼び出しを抽象化

use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::migration_log::LogStatus;
use crate::domain::services::session_planner::SessionWindow;

/// API呼び出しの失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiFailure {
    /// 期待と異なるHTTPステータス
    #[error("unexpected status {0}")]
    Status(u16),
    /// 通信レベルの失敗
    #[error("transport error: {0}")]
    Transport(String),
    /// 成功ステータスだが本文を解釈できない
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ApiFailure {
    /// エラーログの `status_code` カラムに対応する値
    pub fn log_status(&self) -> LogStatus {
        match self {
            ApiFailure::Status(code) => LogStatus::Http(*code),
            ApiFailure::Transport(_) | ApiFailure::Malformed(_) => LogStatus::Unknown,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiFailure>;

/// サブアカウント設定
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountSettings {
    /// アカウントに設定されたタイムゾーン
    pub timezone: Option<String>,
}

/// LMSリポジトリ
///
/// 各呼び出しは1回だけ行われ、リトライしない
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LmsRepository: Send + Sync {
    /// サブアカウント設定を取得する（アカウントの存在確認を兼ねる）
    async fn fetch_account_settings(&self) -> ApiResult<AccountSettings>;

    /// セッションを作成する
    ///
    /// # Returns
    ///
    /// 作成されたセッションのID
    async fn create_session(&self, live_course_id: &str, window: &SessionWindow)
        -> ApiResult<String>;

    /// セッションを公開する
    async fn publish_session(&self, live_course_id: &str, session_id: &str) -> ApiResult<()>;

    /// UIDからユーザーIDを解決する
    async fn find_user_id(&self, uid: &str) -> ApiResult<String>;

    /// ユーザーをセッションに登録する
    async fn register_user(&self, session_id: &str, user_id: &str) -> ApiResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_status_from_failure() {
        assert_eq!(ApiFailure::Status(422).log_status(), LogStatus::Http(422));
        assert_eq!(
            ApiFailure::Transport("connection refused".to_string()).log_status(),
            LogStatus::Unknown
        );
        assert_eq!(
            ApiFailure::Malformed("missing id".to_string()).log_status(),
            LogStatus::Unknown
        );
    }
}
