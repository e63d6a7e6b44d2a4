//! Employment-type mapping and industry-category inference.

use crate::domains::jobs::models::{JobCategory, JobType};

/// Ordered (category, keywords) pairs; the FIRST category with any substring
/// match wins, so order matters (Technology outranks Engineering for
/// "Software Engineer"). Matching is plain substring containment, not
/// word-boundary tokenization; changing that would reclassify existing data.
const CATEGORY_KEYWORDS: &[(JobCategory, &[&str])] = &[
    (
        JobCategory::Technology,
        &["software", "developer", "programmer", "ict", "data", "network", "web", "computer"],
    ),
    (
        JobCategory::Healthcare,
        &["health", "medical", "nurse", "doctor", "clinic", "hospital", "pharmac", "midwife"],
    ),
    (
        JobCategory::Education,
        &["teacher", "teaching", "education", "school", "lecturer", "tutor", "curriculum"],
    ),
    (
        JobCategory::Finance,
        &["finance", "accountant", "accounting", "bank", "audit", "microfinance", "treasury"],
    ),
    (
        JobCategory::Sales,
        &["sales", "marketing", "business development", "merchandis", "customer service"],
    ),
    (
        JobCategory::Administration,
        &["administrat", "secretary", "clerk", "receptionist", "office assistant"],
    ),
    (
        JobCategory::Engineering,
        &["engineer", "construction", "mechanical", "electrical", "civil works", "surveyor"],
    ),
    (
        JobCategory::Ngo,
        &["ngo", "non-governmental", "nonprofit", "non-profit", "humanitarian", "charity", "donor"],
    ),
    (
        JobCategory::Government,
        &["government", "ministry", "public sector", "civil service", "parastatal"],
    ),
];

/// Map a free-text employment type onto the fixed enum.
///
/// Unrecognized or absent input defaults to full-time.
pub fn map_job_type(value: Option<&str>) -> JobType {
    let normalized = value.map(|text| text.trim().to_lowercase()).unwrap_or_default();
    match normalized.as_str() {
        "full-time" | "fulltime" | "full time" | "full_time" | "permanent" => JobType::FullTime,
        "part-time" | "parttime" | "part time" | "part_time" => JobType::PartTime,
        "contract" | "contractor" | "temporary" | "temp" | "fixed-term" | "fixed term" => {
            JobType::Contract
        }
        "internship" | "intern" | "graduate trainee" | "attachment" => JobType::Internship,
        "volunteer" | "voluntary" | "volunteering" => JobType::Volunteer,
        _ => JobType::FullTime,
    }
}

/// Infer an industry category from the title and description.
pub fn infer_category(title: &str, description: &str) -> JobCategory {
    let haystack = format!("{} {}", title, description).to_lowercase();
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|keyword| haystack.contains(keyword)) {
            return *category;
        }
    }
    JobCategory::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_job_type_synonyms() {
        assert_eq!(map_job_type(Some("Full-Time")), JobType::FullTime);
        assert_eq!(map_job_type(Some("fulltime")), JobType::FullTime);
        assert_eq!(map_job_type(Some("PERMANENT")), JobType::FullTime);
        assert_eq!(map_job_type(Some(" part time ")), JobType::PartTime);
        assert_eq!(map_job_type(Some("Temp")), JobType::Contract);
        assert_eq!(map_job_type(Some("contractor")), JobType::Contract);
        assert_eq!(map_job_type(Some("Intern")), JobType::Internship);
        assert_eq!(map_job_type(Some("voluntary")), JobType::Volunteer);
    }

    #[test]
    fn test_map_job_type_defaults_to_full_time() {
        assert_eq!(map_job_type(None), JobType::FullTime);
        assert_eq!(map_job_type(Some("")), JobType::FullTime);
        assert_eq!(map_job_type(Some("gig")), JobType::FullTime);
    }

    #[test]
    fn test_technology_checked_before_engineering() {
        // "engineer" is an Engineering keyword, but "software" hits first
        assert_eq!(
            infer_category("Software Engineer", "build web apps"),
            JobCategory::Technology
        );
    }

    #[test]
    fn test_category_inference() {
        assert_eq!(infer_category("Staff Nurse", ""), JobCategory::Healthcare);
        assert_eq!(infer_category("Primary School Teacher", ""), JobCategory::Education);
        assert_eq!(infer_category("Branch Accountant", ""), JobCategory::Finance);
        assert_eq!(infer_category("Sales Representative", ""), JobCategory::Sales);
        assert_eq!(infer_category("Civil Engineer", "roads"), JobCategory::Engineering);
        assert_eq!(
            infer_category("Programme Officer", "international NGO in Freetown"),
            JobCategory::Ngo
        );
        assert_eq!(
            infer_category("Procurement Officer", "Ministry of Works"),
            JobCategory::Government
        );
    }

    #[test]
    fn test_category_defaults_to_other() {
        assert_eq!(infer_category("Driver", "valid licence required"), JobCategory::Other);
        assert_eq!(infer_category("", ""), JobCategory::Other);
    }

    #[test]
    fn test_substring_semantics_not_word_boundaries() {
        // "pharmac" matches inside "pharmaceutical" by design of the keyword
        assert_eq!(
            infer_category("Pharmaceutical rep", ""),
            JobCategory::Healthcare
        );
    }
}
