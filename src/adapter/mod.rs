//! Adapter Layer
//!
//! 外部システム（Bridge REST API, ファイルシステム）との統合

pub mod bridge;
pub mod config;
pub mod repositories;
