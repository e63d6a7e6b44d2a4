//! Batch import orchestration.
//!
//! Processes one batch strictly sequentially: each record is normalized,
//! deduplicated against the store by (source, external_id), and inserted or
//! updated. A failure on one record is attributed to that record and the
//! batch continues; the run log captures the aggregate outcome.

use serde_json::Value;
use serde::Serialize;
use tracing::info;

use crate::common::ImportRunId;
use crate::common::utils::normalize_value;
use crate::domains::jobs::models::{ImportError, ImportRunOutcome, ImportRunStatus};
use crate::kernel::BaseJobStore;

use super::NormalizedJob;

/// Aggregate counters for one import batch
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ImportResult {
    pub total: i32,
    pub imported: i32,
    pub updated: i32,
    pub skipped: i32,
    pub failed: i32,
    pub errors: Vec<ImportError>,
}

/// Batch result plus the run-log id (None when the log write itself failed)
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub run_id: Option<ImportRunId>,
    pub results: ImportResult,
}

/// Import a batch of raw job records from one provider.
///
/// Re-running the same batch is idempotent at the record level (matching
/// dedup keys update rather than duplicate) but every call opens a fresh
/// run-log entry. Run-log write failures are logged and swallowed; the
/// import outcome is still returned.
pub async fn import_batch(store: &dyn BaseJobStore, source: &str, raw_jobs: &[Value]) -> ImportOutcome {
    let total = raw_jobs.len() as i32;

    info!(
        action = "IMPORT_STARTED",
        source = %source,
        jobs_found = total,
        "Starting job import batch"
    );

    let run_id = match store.create_import_run(source, total).await {
        Ok(run) => Some(run.id),
        Err(e) => {
            tracing::error!(
                source = %source,
                error = %e,
                "Failed to create import run log; continuing without it"
            );
            None
        }
    };

    let mut imported = 0;
    let mut updated = 0;
    let mut failed = 0;
    let mut errors: Vec<ImportError> = Vec::new();

    for raw in raw_jobs {
        match process_record(store, source, raw).await {
            Ok(RecordOutcome::Inserted) => imported += 1,
            Ok(RecordOutcome::Updated) => updated += 1,
            Err(e) => {
                failed += 1;
                let job = record_label(raw);
                tracing::error!(
                    action = "RECORD_FAILED",
                    source = %source,
                    job = %job,
                    error = %e,
                    "Failed to import job record"
                );
                errors.push(ImportError {
                    job,
                    error: e.to_string(),
                });
            }
        }
    }

    // Derived, not independently tracked; 0 on every normal path
    let skipped = total - imported - updated - failed;

    let status = if failed > 0 {
        ImportRunStatus::Partial
    } else {
        ImportRunStatus::Completed
    };

    if let Some(id) = run_id {
        let outcome = ImportRunOutcome {
            status,
            jobs_new: imported,
            jobs_updated: updated,
            jobs_skipped: skipped,
            jobs_failed: failed,
            error_details: if errors.is_empty() {
                None
            } else {
                Some(errors.clone())
            },
        };
        if let Err(e) = store.finalize_import_run(id, &outcome).await {
            tracing::error!(
                source = %source,
                run_id = %id,
                error = %e,
                "Failed to finalize import run log"
            );
        }
    }

    info!(
        action = "IMPORT_FINISHED",
        source = %source,
        status = %status,
        total,
        imported,
        updated,
        skipped,
        failed,
        "Job import batch finished"
    );

    ImportOutcome {
        run_id,
        results: ImportResult {
            total,
            imported,
            updated,
            skipped,
            failed,
            errors,
        },
    }
}

enum RecordOutcome {
    Inserted,
    Updated,
}

/// Normalize one record and upsert it by dedup key.
async fn process_record(
    store: &dyn BaseJobStore,
    source: &str,
    raw: &Value,
) -> anyhow::Result<RecordOutcome> {
    let job = NormalizedJob::from_raw(raw, source);

    let existing = store
        .find_by_source_and_external_id(source, &job.external_id)
        .await?;

    match existing {
        Some(found) => {
            let refreshed = store.update_job(found.id, &job).await?;
            info!(
                action = "UPDATED",
                job_id = %refreshed.id,
                external_id = %job.external_id,
                title = %job.title,
                "Updated existing job from import"
            );
            Ok(RecordOutcome::Updated)
        }
        None => {
            let inserted = store.insert_job(&job).await?;
            info!(
                action = "INSERTED",
                job_id = %inserted.id,
                external_id = %job.external_id,
                title = %job.title,
                quality_score = job.quality_score,
                "Inserted new job from import"
            );
            Ok(RecordOutcome::Inserted)
        }
    }
}

/// Title to attribute a failure to; "Unknown" when the record has none.
fn record_label(raw: &Value) -> String {
    let title = raw.get("title").map(normalize_value).unwrap_or_default();
    if title.is_empty() {
        "Unknown".to_string()
    } else {
        title
    }
}
