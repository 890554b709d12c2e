//! # Session Planner Service
//!
//! 受講記録から作成すべきセッションを導出するサービス

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::HashSet;

use crate::domain::entities::enrollment::{EnrollmentRecord, SessionKey};

/// セッション開始時刻（現地時間の正午）
const SESSION_START_HOUR: u32 = 12;
/// セッションの長さ（分）
const SESSION_LENGTH_MINUTES: i64 = 60;

/// セッションの時間枠
///
/// 日時はタイムゾーンを持たない現地時間で、`timezone` と一緒に送信される
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionWindow {
    pub timezone: String,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
}

impl SessionWindow {
    /// `YYYY-MM-DDTHH:MM:SS` 形式の開始時刻
    pub fn start_at_iso(&self) -> String {
        self.start_at.format("%Y-%m-%dT%H:%M:%S").to_string()
    }

    /// `YYYY-MM-DDTHH:MM:SS` 形式の終了時刻
    pub fn end_at_iso(&self) -> String {
        self.end_at.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

/// セッション計画サービス
pub struct SessionPlanner;

impl SessionPlanner {
    /// 一意なセッションキーを最初に現れた順で返す
    ///
    /// # Arguments
    ///
    /// * `records` - 受講記録
    ///
    /// # Returns
    ///
    /// 重複を除いたセッションキーのリスト
    pub fn unique_session_keys(records: &[EnrollmentRecord]) -> Vec<SessionKey> {
        let mut seen = HashSet::new();
        records
            .iter()
            .map(EnrollmentRecord::session_key)
            .filter(|key| seen.insert(key.clone()))
            .collect()
    }

    /// 修了日の正午から1時間のセッション枠を作る
    ///
    /// # Returns
    ///
    /// 修了日が `YYYY-MM-DD` として解釈できない場合は `None`
    pub fn session_window(key: &SessionKey, timezone: &str) -> Option<SessionWindow> {
        let date = NaiveDate::parse_from_str(key.completed_at.trim(), "%Y-%m-%d").ok()?;
        let start_at = date.and_time(NaiveTime::from_hms_opt(SESSION_START_HOUR, 0, 0)?);
        let end_at = start_at + Duration::minutes(SESSION_LENGTH_MINUTES);

        Some(SessionWindow {
            timezone: timezone.to_string(),
            start_at,
            end_at,
        })
    }
}
