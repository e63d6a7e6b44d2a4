use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::common::ImportRunId;

/// ImportRun - audit log for one invocation of the batch import endpoint
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ImportRun {
    pub id: ImportRunId,
    pub source: String,
    pub status: String, // 'running', 'completed', 'partial'

    pub jobs_found: i32,
    pub jobs_new: i32,
    pub jobs_updated: i32,
    pub jobs_skipped: i32,
    pub jobs_failed: i32,
    pub error_details: Option<Json<Vec<ImportError>>>,

    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// One per-record failure, attributed by job title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportError {
    pub job: String,
    pub error: String,
}

/// Run status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImportRunStatus {
    Running,
    Completed,
    Partial,
}

impl ImportRunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportRunStatus::Running => "running",
            ImportRunStatus::Completed => "completed",
            ImportRunStatus::Partial => "partial",
        }
    }
}

impl std::fmt::Display for ImportRunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ImportRunStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "running" => Ok(ImportRunStatus::Running),
            "completed" => Ok(ImportRunStatus::Completed),
            "partial" => Ok(ImportRunStatus::Partial),
            _ => Err(anyhow::anyhow!("Invalid import run status: {}", s)),
        }
    }
}

/// Aggregate outcome written back when a run finalizes
#[derive(Debug, Clone)]
pub struct ImportRunOutcome {
    pub status: ImportRunStatus,
    pub jobs_new: i32,
    pub jobs_updated: i32,
    pub jobs_skipped: i32,
    pub jobs_failed: i32,
    pub error_details: Option<Vec<ImportError>>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl ImportRun {
    /// Create a run in 'running' state at the start of a batch
    pub async fn create(source: &str, jobs_found: i32, pool: &PgPool) -> Result<Self> {
        let run = sqlx::query_as::<_, ImportRun>(
            r#"
            INSERT INTO job_import_runs (source, status, jobs_found)
            VALUES ($1, 'running', $2)
            RETURNING *
            "#,
        )
        .bind(source)
        .bind(jobs_found)
        .fetch_one(pool)
        .await?;
        Ok(run)
    }

    /// Finalize a run with aggregate counters and the ordered error list
    pub async fn finalize(
        id: ImportRunId,
        outcome: &ImportRunOutcome,
        pool: &PgPool,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE job_import_runs
            SET status = $1,
                jobs_new = $2,
                jobs_updated = $3,
                jobs_skipped = $4,
                jobs_failed = $5,
                error_details = $6,
                completed_at = NOW()
            WHERE id = $7
            "#,
        )
        .bind(outcome.status.as_str())
        .bind(outcome.jobs_new)
        .bind(outcome.jobs_updated)
        .bind(outcome.jobs_skipped)
        .bind(outcome.jobs_failed)
        .bind(outcome.error_details.as_ref().map(Json))
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find a run by ID
    pub async fn find_by_id(id: ImportRunId, pool: &PgPool) -> Result<Self> {
        let run = sqlx::query_as::<_, ImportRun>("SELECT * FROM job_import_runs WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(run)
    }

    /// Most recent runs for a source, newest first
    pub async fn find_recent(source: &str, limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        let runs = sqlx::query_as::<_, ImportRun>(
            r#"
            SELECT * FROM job_import_runs
            WHERE source = $1
            ORDER BY started_at DESC
            LIMIT $2
            "#,
        )
        .bind(source)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(runs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            ImportRunStatus::Running,
            ImportRunStatus::Completed,
            ImportRunStatus::Partial,
        ] {
            let parsed: ImportRunStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }
}
