//! # Use Cases
//!
//! 移行処理のビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **ValidateAccountUseCase**: アカウントの存在確認とタイムゾーン取得
//! - **LoadEnrollmentsUseCase**: 受講記録の読み込みと重複排除
//! - **ProvisionSessionsUseCase**: セッションの作成と公開
//! - **RegisterUsersUseCase**: ユーザーのセッション登録
//! - **WriteReportsUseCase**: エラー/成功ログの書き出し

pub mod load_enrollments;
pub mod provision_sessions;
pub mod register_users;
pub mod validate_account;
pub mod write_reports;
