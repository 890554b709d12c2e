//! # EnrollmentRecord Entity
//!
//! 入力CSVの1行と、そこから導出されるセッションキー

use serde::Deserialize;
use std::fmt;

/// 入力CSVの必須カラム
pub const REQUIRED_COLUMNS: [&str; 3] = ["uid", "live_course_id", "completed_at"];

/// 受講記録
///
/// 入力CSVの1行を表すエンティティ。読み込み後は変更しない
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnrollmentRecord {
    /// ユーザーのUID
    pub uid: String,
    /// ライブコースID
    pub live_course_id: String,
    /// 修了日（YYYY-MM-DD）
    pub completed_at: String,
    /// CSV上の行番号（ヘッダーを1行目とする）
    #[serde(skip)]
    pub line: u64,
}

impl EnrollmentRecord {
    /// 新しい受講記録を作成
    pub fn new(
        uid: impl Into<String>,
        live_course_id: impl Into<String>,
        completed_at: impl Into<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            live_course_id: live_course_id.into(),
            completed_at: completed_at.into(),
            line: 0,
        }
    }

    /// 行番号を設定
    pub fn with_line(mut self, line: u64) -> Self {
        self.line = line;
        self
    }

    /// この行が登録されるべきセッションのキー
    pub fn session_key(&self) -> SessionKey {
        SessionKey::new(self.live_course_id.clone(), self.completed_at.clone())
    }
}

/// セッションキー
///
/// (コースID, 修了日) の組。一意なキーごとに1つのセッションが作成される
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionKey {
    pub live_course_id: String,
    pub completed_at: String,
}

impl SessionKey {
    pub fn new(live_course_id: impl Into<String>, completed_at: impl Into<String>) -> Self {
        Self {
            live_course_id: live_course_id.into(),
            completed_at: completed_at.into(),
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.completed_at, self.live_course_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key_from_record() {
        let record = EnrollmentRecord::new("jdoe", "10", "2021-01-05");
        let key = record.session_key();

        assert_eq!(key.live_course_id, "10");
        assert_eq!(key.completed_at, "2021-01-05");
    }

    #[test]
    fn test_session_key_display() {
        let key = SessionKey::new("10", "2021-01-05");
        assert_eq!(key.to_string(), "2021-01-05-10");
    }

    #[test]
    fn test_same_course_and_date_share_key() {
        let a = EnrollmentRecord::new("alice", "10", "2021-01-05");
        let b = EnrollmentRecord::new("bob", "10", "2021-01-05");
        let c = EnrollmentRecord::new("carol", "10", "2021-01-06");

        assert_eq!(a.session_key(), b.session_key());
        assert_ne!(a.session_key(), c.session_key());
    }

    #[test]
    fn test_with_line() {
        let record = EnrollmentRecord::new("jdoe", "10", "2021-01-05").with_line(7);
        assert_eq!(record.line, 7);
    }
}
