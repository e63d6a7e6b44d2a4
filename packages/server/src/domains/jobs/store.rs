//! Postgres-backed job store.
//!
//! Thin delegation layer over the model queries; all SQL lives in models/.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::common::{ImportRunId, JobId};
use crate::kernel::BaseJobStore;

use super::ingest::NormalizedJob;
use super::models::{ImportRun, ImportRunOutcome, Job};

/// Production `BaseJobStore` over the jobs and job_import_runs tables.
#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseJobStore for PgJobStore {
    async fn find_by_source_and_external_id(
        &self,
        source: &str,
        external_id: &str,
    ) -> Result<Option<Job>> {
        Job::find_by_source_and_external_id(source, external_id, &self.pool).await
    }

    async fn insert_job(&self, job: &NormalizedJob) -> Result<Job> {
        Job::insert_imported(job, &self.pool).await
    }

    async fn update_job(&self, id: JobId, job: &NormalizedJob) -> Result<Job> {
        Job::update_from_import(id, job, &self.pool).await
    }

    async fn create_import_run(&self, source: &str, jobs_found: i32) -> Result<ImportRun> {
        ImportRun::create(source, jobs_found, &self.pool).await
    }

    async fn finalize_import_run(
        &self,
        id: ImportRunId,
        outcome: &ImportRunOutcome,
    ) -> Result<()> {
        ImportRun::finalize(id, outcome, &self.pool).await
    }

    async fn recent_import_runs(&self, source: &str, limit: i64) -> Result<Vec<ImportRun>> {
        ImportRun::find_recent(source, limit, &self.pool).await
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
