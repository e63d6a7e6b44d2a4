//! Data-quality scoring for normalized jobs.

use super::NormalizedJob;

/// Completeness score, 0-100.
///
/// Additive point table over the extracted fields; the table totals exactly
/// 100, and the cap is still enforced as part of the contract.
pub fn score(job: &NormalizedJob) -> i32 {
    let mut score = 0;

    if job.title.chars().count() >= 5 {
        score += 20;
    }
    if job.company.chars().count() >= 3 {
        score += 15;
    }

    let description_len = job.description.chars().count();
    if description_len >= 100 {
        score += 10;
    }
    if description_len >= 300 {
        score += 10;
    }
    if description_len >= 500 {
        score += 5;
    }

    if !job.requirements.is_empty() {
        score += 15;
    }
    if job.salary_range.is_some() {
        score += 10;
    }
    if !job.location.is_empty() {
        score += 10;
    }
    if job.source_url.is_some() {
        score += 5;
    }

    score.min(100)
}
