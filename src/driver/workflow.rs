//! Workflow Orchestration
//!
//! 移行ワークフロー全体のオーケストレーション

use anyhow::Result;
use chrono::{Local, NaiveDate};
use log::info;
use std::sync::Arc;

use crate::adapter::bridge::client::BridgeClient;
use crate::adapter::config::Config;
use crate::adapter::repositories::csv_enrollment_repository::CsvEnrollmentRepository;
use crate::adapter::repositories::csv_report_repository::CsvReportRepository;
use crate::application::dto::enrollment_plan::EnrollmentPlan;
use crate::application::dto::migration_context::MigrationContext;
use crate::application::use_cases::load_enrollments::LoadEnrollmentsUseCase;
use crate::application::use_cases::provision_sessions::{
    ProvisionSessionsUseCase, ProvisioningSummary,
};
use crate::application::use_cases::register_users::{RegisterUsersUseCase, RegistrationSummary};
use crate::application::use_cases::validate_account::ValidateAccountUseCase;
use crate::application::use_cases::write_reports::{ReportPaths, WriteReportsUseCase};
use crate::domain::repositories::enrollment_repository::EnrollmentRepository;
use crate::domain::repositories::lms_repository::LmsRepository;
use crate::domain::repositories::report_repository::ReportRepository;
use crate::domain::services::session_planner::SessionPlanner;

/// Outcome of one run
#[derive(Debug, Clone, Default)]
pub struct MigrationSummary {
    /// Rows read from the CSV
    pub rows: usize,
    /// Unique (course, date) pairs
    pub planned_sessions: usize,
    pub provisioning: ProvisioningSummary,
    pub registration: RegistrationSummary,
    /// `None` in dry-run mode
    pub reports: Option<ReportPaths>,
}

/// ILT historical data migration workflow
pub struct MigrationWorkflow<L: LmsRepository, E: EnrollmentRepository, R: ReportRepository> {
    config: Config,
    validate_use_case: ValidateAccountUseCase<L>,
    load_use_case: LoadEnrollmentsUseCase<E>,
    provision_use_case: ProvisionSessionsUseCase<L>,
    register_use_case: RegisterUsersUseCase<L>,
    report_use_case: WriteReportsUseCase<R>,
}

impl MigrationWorkflow<BridgeClient, CsvEnrollmentRepository, CsvReportRepository> {
    /// Create a workflow wired to the Bridge API and the local filesystem
    pub fn new(config: Config) -> Result<Self> {
        let lms_repo = Arc::new(BridgeClient::new(&config)?);
        let enrollment_repo = Arc::new(CsvEnrollmentRepository::new());
        let report_repo = Arc::new(CsvReportRepository::new(config.output_dir.clone()));

        Ok(Self::with_repositories(
            config,
            lms_repo,
            enrollment_repo,
            report_repo,
        ))
    }
}

impl<L: LmsRepository, E: EnrollmentRepository, R: ReportRepository> MigrationWorkflow<L, E, R> {
    /// Create a workflow with injected repositories
    pub fn with_repositories(
        config: Config,
        lms_repo: Arc<L>,
        enrollment_repo: Arc<E>,
        report_repo: Arc<R>,
    ) -> Self {
        Self {
            config,
            validate_use_case: ValidateAccountUseCase::new(lms_repo.clone()),
            load_use_case: LoadEnrollmentsUseCase::new(enrollment_repo),
            provision_use_case: ProvisionSessionsUseCase::new(lms_repo.clone()),
            register_use_case: RegisterUsersUseCase::new(lms_repo),
            report_use_case: WriteReportsUseCase::new(report_repo),
        }
    }

    /// Execute the migration, dating the reports today
    pub async fn execute(&self, dry_run: bool) -> Result<MigrationSummary> {
        self.execute_on(dry_run, Local::now().date_naive()).await
    }

    /// Execute the migration
    ///
    /// Setup failures (account, file, timezone, CSV header) abort before any
    /// session is created. Per-session and per-row failures end up in the
    /// error report.
    pub async fn execute_on(&self, dry_run: bool, run_date: NaiveDate) -> Result<MigrationSummary> {
        info!("Starting ILT historical data migration...");
        info!("Dry run: {}", dry_run);
        println!(
            "Let's get started by adding historical ILT enrollments to {}",
            self.config.base_url
        );

        let settings = self.validate_use_case.execute().await?;
        self.load_use_case.ensure_exists(&self.config.file).await?;
        let timezone = ValidateAccountUseCase::<L>::require_timezone(&settings)?;
        println!("✓ Account timezone: {}", timezone);

        let plan = self.load_use_case.execute(&self.config.file).await?;
        println!(
            "✓ Loaded {} rows ({} unique sessions) from {}",
            plan.records.len(),
            plan.session_keys.len(),
            self.config.file.display()
        );

        let mut summary = MigrationSummary {
            rows: plan.records.len(),
            planned_sessions: plan.session_keys.len(),
            ..MigrationSummary::default()
        };

        if dry_run {
            print_plan(&plan, &timezone);
            println!("✓ Dry-run mode (nothing was created)");
            return Ok(summary);
        }

        let mut context = MigrationContext::new();

        summary.provisioning = self
            .provision_use_case
            .execute(&plan.session_keys, &timezone, &mut context)
            .await;
        println!(
            "✓ Sessions: {} created, {} published ({} failed)",
            summary.provisioning.created, summary.provisioning.published, summary.provisioning.failed
        );

        summary.registration = self
            .register_use_case
            .execute(&plan.records, &mut context)
            .await;
        println!(
            "✓ Registrations: {} succeeded ({} failed)",
            summary.registration.registered, summary.registration.failed
        );

        let reports = self
            .report_use_case
            .execute(&self.config.domain, &context.log, run_date)
            .await?;
        println!("✓ Error report: {}", reports.errors.display());
        println!("✓ Return report: {}", reports.successes.display());
        summary.reports = Some(reports);

        println!("✓ Migration complete!");

        Ok(summary)
    }
}

fn print_plan(plan: &EnrollmentPlan, timezone: &str) {
    println!("  Would create {} sessions:", plan.session_keys.len());
    for key in &plan.session_keys {
        match SessionPlanner::session_window(key, timezone) {
            Some(window) => println!(
                "    - Course: {} | Date: {} | {} to {} ({})",
                key.live_course_id,
                key.completed_at,
                window.start_at_iso(),
                window.end_at_iso(),
                timezone
            ),
            None => println!(
                "    ⚠ Course: {} | Date: {} | invalid date, would be skipped",
                key.live_course_id, key.completed_at
            ),
        }
    }
    println!("  Would register {} rows", plan.records.len());
}
