use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::common::JobId;
use crate::domains::jobs::ingest::NormalizedJob;

/// Job - an imported job listing
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    pub id: JobId,

    // Content
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,

    // Classification (hot path fields)
    pub job_type: String, // 'full_time', 'part_time', 'contract', 'internship', 'volunteer'
    pub category: String, // 'Technology', 'Healthcare', ..., 'Other'

    // Extracted detail
    pub requirements: Json<Vec<String>>,
    pub salary_range: Option<String>,
    pub deadline: Option<NaiveDate>,

    // Provenance
    pub source: String,
    pub source_url: Option<String>,
    pub external_id: String,
    pub is_external: bool,
    pub auto_imported: bool,
    pub quality_score: i32,
    pub raw_json: Value,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_checked_at: DateTime<Utc>,
}

// =============================================================================
// Enums for type-safe classification
// =============================================================================

/// Employment type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Volunteer,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full_time",
            JobType::PartTime => "part_time",
            JobType::Contract => "contract",
            JobType::Internship => "internship",
            JobType::Volunteer => "volunteer",
        }
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for JobType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "full_time" => Ok(JobType::FullTime),
            "part_time" => Ok(JobType::PartTime),
            "contract" => Ok(JobType::Contract),
            "internship" => Ok(JobType::Internship),
            "volunteer" => Ok(JobType::Volunteer),
            _ => Err(anyhow::anyhow!("Invalid job type: {}", s)),
        }
    }
}

/// Industry category enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum JobCategory {
    Technology,
    Healthcare,
    Education,
    Finance,
    Sales,
    Administration,
    Engineering,
    #[serde(rename = "NGO")]
    Ngo,
    Government,
    Other,
}

impl JobCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobCategory::Technology => "Technology",
            JobCategory::Healthcare => "Healthcare",
            JobCategory::Education => "Education",
            JobCategory::Finance => "Finance",
            JobCategory::Sales => "Sales",
            JobCategory::Administration => "Administration",
            JobCategory::Engineering => "Engineering",
            JobCategory::Ngo => "NGO",
            JobCategory::Government => "Government",
            JobCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for JobCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for JobCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Technology" => Ok(JobCategory::Technology),
            "Healthcare" => Ok(JobCategory::Healthcare),
            "Education" => Ok(JobCategory::Education),
            "Finance" => Ok(JobCategory::Finance),
            "Sales" => Ok(JobCategory::Sales),
            "Administration" => Ok(JobCategory::Administration),
            "Engineering" => Ok(JobCategory::Engineering),
            "NGO" => Ok(JobCategory::Ngo),
            "Government" => Ok(JobCategory::Government),
            "Other" => Ok(JobCategory::Other),
            _ => Err(anyhow::anyhow!("Invalid job category: {}", s)),
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Job {
    /// Find a job by its import dedup key
    pub async fn find_by_source_and_external_id(
        source: &str,
        external_id: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let job = sqlx::query_as::<_, Job>(
            "SELECT * FROM jobs WHERE source = $1 AND external_id = $2 LIMIT 1",
        )
        .bind(source)
        .bind(external_id)
        .fetch_optional(pool)
        .await?;
        Ok(job)
    }

    /// Insert a normalized job from the import pipeline (returns inserted record)
    pub async fn insert_imported(job: &NormalizedJob, pool: &PgPool) -> Result<Self> {
        let inserted = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (
                title,
                company,
                description,
                location,
                job_type,
                category,
                requirements,
                salary_range,
                deadline,
                source,
                source_url,
                external_id,
                is_external,
                auto_imported,
                quality_score,
                raw_json
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.description)
        .bind(&job.location)
        .bind(job.job_type.as_str())
        .bind(job.category.as_str())
        .bind(Json(&job.requirements))
        .bind(&job.salary_range)
        .bind(job.deadline)
        .bind(&job.source)
        .bind(&job.source_url)
        .bind(&job.external_id)
        .bind(job.is_external)
        .bind(job.auto_imported)
        .bind(job.quality_score)
        .bind(&job.raw_json)
        .fetch_one(pool)
        .await?;

        Ok(inserted)
    }

    /// Refresh an existing job with re-imported data.
    ///
    /// Updates all mutable fields and bumps updated_at / last_checked_at;
    /// created_at and the dedup key stay as first seen.
    pub async fn update_from_import(id: JobId, job: &NormalizedJob, pool: &PgPool) -> Result<Self> {
        let updated = sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs
            SET title = $1,
                company = $2,
                description = $3,
                location = $4,
                job_type = $5,
                category = $6,
                requirements = $7,
                salary_range = $8,
                deadline = $9,
                source_url = $10,
                quality_score = $11,
                raw_json = $12,
                updated_at = NOW(),
                last_checked_at = NOW()
            WHERE id = $13
            RETURNING *
            "#,
        )
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.description)
        .bind(&job.location)
        .bind(job.job_type.as_str())
        .bind(job.category.as_str())
        .bind(Json(&job.requirements))
        .bind(&job.salary_range)
        .bind(job.deadline)
        .bind(&job.source_url)
        .bind(job.quality_score)
        .bind(&job.raw_json)
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(updated)
    }

    /// Count jobs imported from a source
    pub async fn count_by_source(source: &str, pool: &PgPool) -> Result<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM jobs WHERE source = $1")
                .bind(source)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_type_roundtrip() {
        for job_type in [
            JobType::FullTime,
            JobType::PartTime,
            JobType::Contract,
            JobType::Internship,
            JobType::Volunteer,
        ] {
            let parsed: JobType = job_type.as_str().parse().unwrap();
            assert_eq!(parsed, job_type);
        }
    }

    #[test]
    fn test_category_display_matches_parse() {
        let parsed: JobCategory = "NGO".parse().unwrap();
        assert_eq!(parsed, JobCategory::Ngo);
        assert_eq!(JobCategory::Ngo.to_string(), "NGO");
        assert!("Unknown".parse::<JobCategory>().is_err());
    }
}
