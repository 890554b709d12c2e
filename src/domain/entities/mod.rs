//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **EnrollmentRecord**: 入力CSVの1行
//! - **SessionKey**: (コースID, 修了日) の複合キー
//! - **SessionTable**: 作成済みセッションの対応表
//! - **MigrationLog**: エラー/成功ログの蓄積

pub mod enrollment;
pub mod migration_log;
pub mod session_record;
