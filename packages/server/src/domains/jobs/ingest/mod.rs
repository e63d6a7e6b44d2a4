//! Job import pipeline.
//!
//! Third-party listings arrive as arbitrarily-shaped JSON. The pipeline
//! normalizes each record in stages:
//!
//! 1. [`extract`] pulls the logical fields out via ordered alias lookups
//! 2. [`classify`] maps the employment type and infers an industry category
//! 3. [`quality`] scores completeness 0-100
//! 4. [`importer`] runs the batch: dedup by (source, external_id), insert or
//!    update through the store, and write the audit run log
//!
//! Extraction is tolerant by construction: a record missing every optional
//! field still produces a `NormalizedJob`; validation is left to the store.

pub mod classify;
pub mod extract;
pub mod importer;
pub mod quality;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::domains::jobs::models::{JobCategory, JobType};

pub use importer::{import_batch, ImportOutcome, ImportResult};

/// A fully normalized job listing, ready to persist.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedJob {
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    pub job_type: JobType,
    pub category: JobCategory,
    pub requirements: Vec<String>,
    pub salary_range: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub source: String,
    pub source_url: Option<String>,
    pub external_id: String,
    pub is_external: bool,
    pub auto_imported: bool,
    pub quality_score: i32,
    /// Original record, retained for audit/debugging
    pub raw_json: Value,
}

impl NormalizedJob {
    /// Run the full normalization pipeline over one raw record.
    ///
    /// Never fails: absent fields fall back to empty/None defaults and the
    /// classifiers have catch-all variants.
    pub fn from_raw(raw: &Value, source: &str) -> Self {
        let fields = extract::extract_fields(raw, source);
        let category = classify::infer_category(&fields.title, &fields.description);

        let mut job = NormalizedJob {
            title: fields.title,
            company: fields.company,
            description: fields.description,
            location: fields.location,
            job_type: fields.job_type,
            category,
            requirements: fields.requirements,
            salary_range: fields.salary_range,
            deadline: fields.deadline,
            source: source.to_string(),
            source_url: fields.source_url,
            external_id: fields.external_id,
            is_external: true,
            auto_imported: true,
            quality_score: 0,
            raw_json: raw.clone(),
        };
        job.quality_score = quality::score(&job);
        job
    }
}
