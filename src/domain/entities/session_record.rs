//! # SessionRecord Entity
//!
//! 実行中に作成したセッションの対応表

use std::collections::HashMap;

use super::enrollment::SessionKey;

/// セッションの状態
///
/// `Created` のまま残ったセッションは公開に失敗している
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Created,
    Published,
}

/// 作成済みセッション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    /// リモートのセッションID
    pub session_id: String,
    pub state: SessionState,
}

impl SessionRecord {
    pub fn created(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            state: SessionState::Created,
        }
    }

    #[inline]
    pub fn is_published(&self) -> bool {
        self.state == SessionState::Published
    }
}

/// セッション対応表
///
/// 作成に失敗したキーは登録されない
#[derive(Debug, Clone, Default)]
pub struct SessionTable {
    records: HashMap<SessionKey, SessionRecord>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 作成したセッションを記録
    pub fn record_created(&mut self, key: SessionKey, session_id: impl Into<String>) {
        self.records.insert(key, SessionRecord::created(session_id));
    }

    /// セッションを公開済みにする
    ///
    /// # Returns
    ///
    /// キーが存在した場合に `true`
    pub fn mark_published(&mut self, key: &SessionKey) -> bool {
        match self.records.get_mut(key) {
            Some(record) => {
                record.state = SessionState::Published;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, key: &SessionKey) -> Option<&SessionRecord> {
        self.records.get(key)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_created_is_not_published() {
        let mut table = SessionTable::new();
        let key = SessionKey::new("10", "2021-01-05");

        table.record_created(key.clone(), "555");

        let record = table.get(&key).unwrap();
        assert_eq!(record.session_id, "555");
        assert_eq!(record.state, SessionState::Created);
        assert!(!record.is_published());
    }

    #[test]
    fn test_mark_published() {
        let mut table = SessionTable::new();
        let key = SessionKey::new("10", "2021-01-05");
        table.record_created(key.clone(), "555");

        assert!(table.mark_published(&key));
        assert!(table.get(&key).unwrap().is_published());
    }

    #[test]
    fn test_mark_published_unknown_key() {
        let mut table = SessionTable::new();
        let key = SessionKey::new("10", "2021-01-05");

        assert!(!table.mark_published(&key));
        assert!(table.get(&key).is_none());
    }
}
