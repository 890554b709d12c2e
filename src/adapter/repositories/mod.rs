//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod csv_enrollment_repository;
pub mod csv_report_repository;
