// Test dependencies - in-memory implementations for testing
//
// Provides an in-memory job store that can be injected anywhere a
// BaseJobStore is expected, with failure injection for exercising the
// importer's per-record error recovery.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;

use crate::common::{ImportRunId, JobId};
use crate::domains::jobs::ingest::NormalizedJob;
use crate::domains::jobs::models::{ImportRun, ImportRunOutcome, Job};

use super::BaseJobStore;

// =============================================================================
// In-memory Job Store
// =============================================================================

/// In-memory `BaseJobStore` backed by plain vectors.
///
/// Clones share state, so a test can keep a handle for inspection while the
/// app under test holds another.
#[derive(Clone, Default)]
pub struct InMemoryJobStore {
    jobs: Arc<Mutex<Vec<Job>>>,
    runs: Arc<Mutex<Vec<ImportRun>>>,
    // external_ids whose insert/update should fail
    failing_external_ids: Arc<Mutex<HashSet<String>>>,
    fail_run_log: Arc<Mutex<bool>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make insert/update fail for records with this external id
    pub fn with_write_failure(self, external_id: &str) -> Self {
        self.failing_external_ids
            .lock()
            .unwrap()
            .insert(external_id.to_string());
        self
    }

    /// Make run-log creation fail
    pub fn with_run_log_failure(self) -> Self {
        *self.fail_run_log.lock().unwrap() = true;
        self
    }

    /// Snapshot of stored jobs
    pub fn jobs(&self) -> Vec<Job> {
        self.jobs.lock().unwrap().clone()
    }

    /// Snapshot of run-log entries
    pub fn runs(&self) -> Vec<ImportRun> {
        self.runs.lock().unwrap().clone()
    }

    fn check_write_allowed(&self, external_id: &str) -> Result<()> {
        if self.failing_external_ids.lock().unwrap().contains(external_id) {
            bail!("simulated store failure for {}", external_id);
        }
        Ok(())
    }

    fn materialize(job: &NormalizedJob) -> Job {
        let now = Utc::now();
        Job {
            id: JobId::new(),
            title: job.title.clone(),
            company: job.company.clone(),
            description: job.description.clone(),
            location: job.location.clone(),
            job_type: job.job_type.to_string(),
            category: job.category.to_string(),
            requirements: Json(job.requirements.clone()),
            salary_range: job.salary_range.clone(),
            deadline: job.deadline,
            source: job.source.clone(),
            source_url: job.source_url.clone(),
            external_id: job.external_id.clone(),
            is_external: job.is_external,
            auto_imported: job.auto_imported,
            quality_score: job.quality_score,
            raw_json: job.raw_json.clone(),
            created_at: now,
            updated_at: now,
            last_checked_at: now,
        }
    }
}

#[async_trait]
impl BaseJobStore for InMemoryJobStore {
    async fn find_by_source_and_external_id(
        &self,
        source: &str,
        external_id: &str,
    ) -> Result<Option<Job>> {
        let jobs = self.jobs.lock().unwrap();
        Ok(jobs
            .iter()
            .find(|job| job.source == source && job.external_id == external_id)
            .cloned())
    }

    async fn insert_job(&self, job: &NormalizedJob) -> Result<Job> {
        self.check_write_allowed(&job.external_id)?;
        let record = Self::materialize(job);
        self.jobs.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_job(&self, id: JobId, job: &NormalizedJob) -> Result<Job> {
        self.check_write_allowed(&job.external_id)?;
        let mut jobs = self.jobs.lock().unwrap();
        let existing = jobs
            .iter_mut()
            .find(|candidate| candidate.id == id)
            .ok_or_else(|| anyhow::anyhow!("no job with id {}", id))?;

        existing.title = job.title.clone();
        existing.company = job.company.clone();
        existing.description = job.description.clone();
        existing.location = job.location.clone();
        existing.job_type = job.job_type.to_string();
        existing.category = job.category.to_string();
        existing.requirements = Json(job.requirements.clone());
        existing.salary_range = job.salary_range.clone();
        existing.deadline = job.deadline;
        existing.source_url = job.source_url.clone();
        existing.quality_score = job.quality_score;
        existing.raw_json = job.raw_json.clone();
        existing.updated_at = Utc::now();
        existing.last_checked_at = Utc::now();

        Ok(existing.clone())
    }

    async fn create_import_run(&self, source: &str, jobs_found: i32) -> Result<ImportRun> {
        if *self.fail_run_log.lock().unwrap() {
            bail!("simulated run log failure");
        }
        let run = ImportRun {
            id: ImportRunId::new(),
            source: source.to_string(),
            status: "running".to_string(),
            jobs_found,
            jobs_new: 0,
            jobs_updated: 0,
            jobs_skipped: 0,
            jobs_failed: 0,
            error_details: None,
            started_at: Utc::now(),
            completed_at: None,
        };
        self.runs.lock().unwrap().push(run.clone());
        Ok(run)
    }

    async fn finalize_import_run(
        &self,
        id: ImportRunId,
        outcome: &ImportRunOutcome,
    ) -> Result<()> {
        let mut runs = self.runs.lock().unwrap();
        let run = runs
            .iter_mut()
            .find(|candidate| candidate.id == id)
            .ok_or_else(|| anyhow::anyhow!("no import run with id {}", id))?;

        run.status = outcome.status.to_string();
        run.jobs_new = outcome.jobs_new;
        run.jobs_updated = outcome.jobs_updated;
        run.jobs_skipped = outcome.jobs_skipped;
        run.jobs_failed = outcome.jobs_failed;
        run.error_details = outcome.error_details.clone().map(Json);
        run.completed_at = Some(Utc::now());
        Ok(())
    }

    async fn recent_import_runs(&self, source: &str, limit: i64) -> Result<Vec<ImportRun>> {
        let mut runs: Vec<ImportRun> = self
            .runs
            .lock()
            .unwrap()
            .iter()
            .filter(|run| run.source == source)
            .cloned()
            .collect();
        runs.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        runs.truncate(limit.max(0) as usize);
        Ok(runs)
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
