//! CLI Argument Parsing
//!
//! CLIの引数解析と、足りない入力の対話的な取得

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::adapter::config::Config;
use crate::domain::errors::MigrationError;

/// 過去のライブ研修の修了記録をBridgeへ移行するCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "ilt-migrate")]
#[command(
    about = "Create Bridge live training sessions and registrations from historical completions",
    long_about = None
)]
pub struct Args {
    /// The domain for the Bridge instance, for example 'acme' for acme.bridgeapp.com
    #[arg(short, long)]
    pub domain: Option<String>,

    /// The API token for accessing the domain
    #[arg(short, long, env = "BRIDGE_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// CSV with uid, live_course_id and completed_at columns
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Directory for the error and return reports
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Override the API root (defaults to https://{domain}.bridgeapp.com/api/)
    #[arg(long, env = "BRIDGE_BASE_URL")]
    pub base_url: Option<String>,

    /// Dry run mode - validate and plan sessions without creating anything
    #[arg(long)]
    pub dry_run: bool,
}

/// 1行の入力を求める。空の回答はエラー
pub fn prompt<R: BufRead, W: Write>(
    label: &'static str,
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    write!(output, "{}: ", label).context("Failed to write prompt")?;
    output.flush().context("Failed to flush stdout")?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("Failed to read input")?;
    let answer = answer.trim().to_string();

    if answer.is_empty() {
        return Err(MigrationError::MissingInput(label).into());
    }
    Ok(answer)
}

impl Args {
    /// 足りない入力を対話的に補い、検証済みの設定を作る
    ///
    /// # Errors
    ///
    /// 入力が空の場合や、ドメイン/ベースURLが不正な場合にエラーを返す
    pub fn into_config<R: BufRead, W: Write>(self, input: &mut R, output: &mut W) -> Result<Config> {
        let domain = match self.domain {
            Some(domain) => domain,
            None => prompt("Domain", input, output)?,
        };
        let token = match self.token {
            Some(token) => token,
            None => prompt("Token", input, output)?,
        };
        let file = match self.file {
            Some(file) => file,
            None => PathBuf::from(prompt("File", input, output)?),
        };

        let config = Config::new(
            &domain,
            &token,
            file,
            self.output_dir,
            self.base_url.as_deref(),
        )?;
        Ok(config)
    }
}
