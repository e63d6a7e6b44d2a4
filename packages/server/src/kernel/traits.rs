// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "import a batch") should be domain functions that use
// these traits.
//
// Naming convention: Base* for trait names (e.g., BaseJobStore)

use anyhow::Result;
use async_trait::async_trait;

use crate::common::{ImportRunId, JobId};
use crate::domains::jobs::ingest::NormalizedJob;
use crate::domains::jobs::models::{ImportRun, ImportRunOutcome, Job};

// =============================================================================
// Job Store Trait (Infrastructure - persistence for the jobs domain)
// =============================================================================

/// Persistence seam for the import pipeline.
///
/// The Postgres implementation lives in the jobs domain; tests inject
/// [`crate::kernel::InMemoryJobStore`] instead.
#[async_trait]
pub trait BaseJobStore: Send + Sync {
    /// Look up a previously imported job by its dedup key
    async fn find_by_source_and_external_id(
        &self,
        source: &str,
        external_id: &str,
    ) -> Result<Option<Job>>;

    /// Insert a newly imported job
    async fn insert_job(&self, job: &NormalizedJob) -> Result<Job>;

    /// Refresh an existing job with re-imported data
    async fn update_job(&self, id: JobId, job: &NormalizedJob) -> Result<Job>;

    /// Open a run-log entry in 'running' state
    async fn create_import_run(&self, source: &str, jobs_found: i32) -> Result<ImportRun>;

    /// Write the aggregate counters and error list back to a run-log entry
    async fn finalize_import_run(
        &self,
        id: ImportRunId,
        outcome: &ImportRunOutcome,
    ) -> Result<()>;

    /// Most recent run-log entries for a source, newest first
    async fn recent_import_runs(&self, source: &str, limit: i64) -> Result<Vec<ImportRun>>;

    /// Cheap connectivity probe for the health endpoint
    async fn health_check(&self) -> Result<()>;
}
