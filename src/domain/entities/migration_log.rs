//! # MigrationLog Entity
//!
//! 処理中に蓄積するエラー/成功ログ

use std::fmt;

/// エラーログの `status_code` カラム
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStatus {
    /// 期待と異なるHTTPステータス
    Http(u16),
    /// 通信エラーまたは不正なレスポンス
    Unknown,
    /// HTTP呼び出しを伴わないローカルな失敗
    Empty,
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogStatus::Http(code) => write!(f, "{}", code),
            LogStatus::Unknown => f.write_str("Unknown"),
            LogStatus::Empty => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    pub status: LogStatus,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessEntry {
    pub uid: String,
    pub session_id: String,
    pub live_course_id: String,
}

/// 移行ログ
///
/// 追記のみ。実行終了時に2つのCSVへ書き出される
#[derive(Debug, Clone, Default)]
pub struct MigrationLog {
    errors: Vec<ErrorEntry>,
    successes: Vec<SuccessEntry>,
}

impl MigrationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_error(&mut self, status: LogStatus, message: impl Into<String>) {
        self.errors.push(ErrorEntry {
            status,
            message: message.into(),
        });
    }

    pub fn push_success(&mut self, entry: SuccessEntry) {
        self.successes.push(entry);
    }

    pub fn errors(&self) -> &[ErrorEntry] {
        &self.errors
    }

    pub fn successes(&self) -> &[SuccessEntry] {
        &self.successes
    }
}
