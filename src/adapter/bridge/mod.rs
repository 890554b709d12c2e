//! Bridge Adapter Modules
//!
//! Bridge REST API 統合のためのアダプターモジュール

pub mod client;
pub mod models;
