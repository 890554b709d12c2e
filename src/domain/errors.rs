//! # Migration Errors
//!
//! 処理開始前に実行を中断する致命的エラー

use std::path::PathBuf;
use thiserror::Error;

/// 致命的エラー
///
/// セッションやユーザー単位の失敗はここに含まれず、MigrationLogに記録される
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("invalid Bridge domain '{0}': use the subdomain only, e.g. 'acme' for acme.bridgeapp.com")]
    InvalidDomain(String),

    #[error("invalid API base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("ERROR: Status Code == {status} This Bridge account could not be found! Check that the domain is valid!")]
    AccountNotFound { status: u16 },

    #[error("the Bridge account could not be reached: {0}")]
    AccountUnreachable(String),

    #[error("the file does not exist or the path is incorrect: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Could not retrieve the timezone for your specific Bridge account, check that the URL is a valid one.")]
    MissingTimezone,

    #[error("the CSV is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("invalid CSV at line {line}: {message}")]
    InvalidCsv { line: u64, message: String },

    #[error("{0} cannot be empty")]
    MissingInput(&'static str),
}
