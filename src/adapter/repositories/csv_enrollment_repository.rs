//! CSV Enrollment Repository Implementation
//!
//! EnrollmentRepositoryのCSV実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::domain::entities::enrollment::{EnrollmentRecord, REQUIRED_COLUMNS};
use crate::domain::errors::MigrationError;
use crate::domain::repositories::enrollment_repository::EnrollmentRepository;

/// CSVファイルベースの受講記録リポジトリ
pub struct CsvEnrollmentRepository;

impl CsvEnrollmentRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    /// `~` を展開したパス
    pub fn expand_path(path: &Path) -> PathBuf {
        let raw = path.to_string_lossy();
        PathBuf::from(shellexpand::tilde(raw.as_ref()).as_ref())
    }

    /// ヘッダーに無い必須カラム
    fn missing_columns(headers: &csv::StringRecord) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .filter(|column| !headers.iter().any(|header| header == **column))
            .map(|column| column.to_string())
            .collect()
    }

    /// CSVを読み込む（同期処理）
    fn load_sync(path: &Path) -> Result<Vec<EnrollmentRecord>> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open enrollment file: {}", path.display()))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));

        let headers = reader
            .headers()
            .context("Failed to read CSV header")?
            .clone();
        let missing = Self::missing_columns(&headers);
        if !missing.is_empty() {
            return Err(MigrationError::MissingColumns(missing).into());
        }

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            // 1行目はヘッダー
            let line = index as u64 + 2;
            let row = row.map_err(|e| MigrationError::InvalidCsv {
                line,
                message: e.to_string(),
            })?;

            let record: EnrollmentRecord = row
                .deserialize(Some(&headers))
                .map_err(|e| MigrationError::InvalidCsv {
                    line,
                    message: e.to_string(),
                })?;
            records.push(record.with_line(line));
        }

        info!("Read {} rows from {}", records.len(), path.display());

        Ok(records)
    }
}

#[async_trait]
impl EnrollmentRepository for CsvEnrollmentRepository {
    async fn exists(&self, path: &Path) -> bool {
        Self::expand_path(path).is_file()
    }

    async fn load(&self, path: &Path) -> Result<Vec<EnrollmentRecord>> {
        let path = Self::expand_path(path);
        tokio::task::spawn_blocking(move || Self::load_sync(&path))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}

impl Default for CsvEnrollmentRepository {
    fn default() -> Self {
        Self::new()
    }
}
