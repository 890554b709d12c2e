//! # Migration Context
//!
//! 1回の実行の間だけ存在する状態。オーケストレーターが所有し、各ステージに `&mut` で渡す

use crate::domain::entities::migration_log::MigrationLog;
use crate::domain::entities::session_record::SessionTable;

#[derive(Debug, Default)]
pub struct MigrationContext {
    /// 作成済みセッション
    pub sessions: SessionTable,
    /// エラー/成功ログ
    pub log: MigrationLog,
}

impl MigrationContext {
    pub fn new() -> Self {
        Self::default()
    }
}
