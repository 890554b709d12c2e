//! # Enrollment Plan DTO
//!
//! 読み込んだ受講記録と、作成すべきセッションキー

use crate::domain::entities::enrollment::{EnrollmentRecord, SessionKey};
use crate::domain::services::session_planner::SessionPlanner;

/// 受講記録の計画
#[derive(Debug, Clone)]
pub struct EnrollmentPlan {
    /// ファイル上の順序を保った受講記録
    pub records: Vec<EnrollmentRecord>,
    /// 最初に現れた順の一意なセッションキー
    pub session_keys: Vec<SessionKey>,
}

impl EnrollmentPlan {
    /// 受講記録から計画を作成
    pub fn from_records(records: Vec<EnrollmentRecord>) -> Self {
        let session_keys = SessionPlanner::unique_session_keys(&records);
        Self {
            records,
            session_keys,
        }
    }
}
