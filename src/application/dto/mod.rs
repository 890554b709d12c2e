//! # Data Transfer Objects
//!
//! ユースケース間で受け渡すデータ

pub mod enrollment_plan;
pub mod migration_context;
