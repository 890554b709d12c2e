//! # Domain Layer
//!
//! 移行処理のビジネスルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - 外部依存を持たない（Rust標準ライブラリと最小限の依存のみ）
//! - HTTPやCSVについて何も知らない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: ビジネスエンティティ（EnrollmentRecord, SessionTable, MigrationLogなど）
//! - **errors**: 実行を中断する致命的エラー
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: Domain Service（セッション計画）

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;
