//! ilt-migrate - ILT Historical Data Migration
//!
//! 過去のライブ研修の修了記録を Bridge に移行する

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;
use std::io;

use ilt_migrate::driver::{Args, MigrationWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let dry_run = args.dry_run;

    // Prompt for anything missing on the command line
    let config = args.into_config(&mut io::stdin().lock(), &mut io::stdout())?;

    // Create workflow with injected dependencies
    let workflow = MigrationWorkflow::new(config)?;

    workflow.execute(dry_run).await?;

    Ok(())
}
