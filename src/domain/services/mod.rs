//! # Domain Services
//!
//! 特定のエンティティに属さないビジネスルール
//!
//! - **SessionPlanner**: 一意なセッションキーとセッション枠の導出

pub mod session_planner;
