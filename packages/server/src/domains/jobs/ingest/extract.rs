//! Ordered-alias field extraction from raw provider records.
//!
//! Providers disagree on key names, so each logical field tries a fixed
//! alias list and takes the first defined value. Everything here is
//! best-effort: missing fields become empty/None, never errors.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

use crate::common::utils::{normalize_str, normalize_value, value_to_string};
use crate::domains::jobs::models::JobType;

use super::classify::map_job_type;

// Alias lists, in lookup order
const TITLE_KEYS: &[&str] = &["title", "position", "job_title"];
const COMPANY_KEYS: &[&str] = &["company", "company_name", "employer", "organization"];
const DESCRIPTION_KEYS: &[&str] = &["description", "details", "job_description", "summary"];
const LOCATION_KEYS: &[&str] = &["location", "city", "address"];
const TYPE_KEYS: &[&str] = &["type", "job_type", "employment_type"];
const REQUIREMENTS_KEYS: &[&str] = &["requirements", "qualifications"];
const SALARY_KEYS: &[&str] = &["salary", "salary_range", "compensation", "pay"];
const DEADLINE_KEYS: &[&str] = &["deadline", "closing_date", "expiry_date", "application_deadline"];
const URL_KEYS: &[&str] = &["url", "link", "source_url", "apply_url"];
const ID_KEYS: &[&str] = &["id", "job_id", "external_id"];

/// Maximum bullet lines harvested when no requirements section is found
const MAX_BULLET_REQUIREMENTS: usize = 10;

lazy_static! {
    // "Requirements:" ... up to the next section heading or end of text
    static ref REQUIREMENTS_SECTION: Regex = Regex::new(
        r"(?is)(?:requirements|qualifications|you must have)\s*:?\s*(.+?)(?:responsibilities|duties|about|\z)"
    )
    .unwrap();

    // Salary patterns, in priority order: leone-prefixed range, dollar-prefixed
    // range, then a bare numeric range suffixed by a currency code
    static ref LEONE_PREFIX: Regex =
        Regex::new(r"(?i)\b(?:SLL|SLE|Le)\s*\d[\d,]*(?:\s*-\s*(?:SLL|SLE|Le)?\s*\d[\d,]*)?").unwrap();
    static ref DOLLAR_PREFIX: Regex =
        Regex::new(r"\$\s*\d[\d,]*(?:\s*-\s*\$?\s*\d[\d,]*)?").unwrap();
    static ref CODE_SUFFIX: Regex =
        Regex::new(r"(?i)\d[\d,]*(?:\s*-\s*\d[\d,]*)?\s*(?:SLL|SLE|Le|USD)\b").unwrap();
    static ref COMPETITIVE: Regex =
        Regex::new(r"(?i)\b(?:competitive|negotiable|attractive)\b").unwrap();
}

/// Fields pulled out of one raw record, before category inference and scoring.
#[derive(Debug, Clone)]
pub struct ExtractedFields {
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    pub job_type: JobType,
    pub requirements: Vec<String>,
    pub salary_range: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub source_url: Option<String>,
    pub external_id: String,
}

/// Extract every logical field from a raw provider record.
pub fn extract_fields(raw: &Value, source: &str) -> ExtractedFields {
    // Raw description text keeps its line structure for the requirements and
    // salary heuristics; the stored description is the normalized form.
    let raw_description = first_defined(raw, DESCRIPTION_KEYS)
        .map(value_to_string)
        .unwrap_or_default();

    let job_type_text = first_defined(raw, TYPE_KEYS).map(normalize_value);

    ExtractedFields {
        title: extract_text(raw, TITLE_KEYS),
        company: extract_text(raw, COMPANY_KEYS),
        description: normalize_str(&raw_description),
        location: extract_text(raw, LOCATION_KEYS),
        job_type: map_job_type(job_type_text.as_deref()),
        requirements: extract_requirements(raw, &raw_description),
        salary_range: extract_salary_field(raw, &raw_description),
        deadline: extract_deadline(raw),
        source_url: extract_optional_text(raw, URL_KEYS),
        external_id: extract_external_id(raw, source),
    }
}

/// First defined (present, non-null) value among the alias keys.
fn first_defined<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| raw.get(key))
        .find(|value| !value.is_null())
}

fn extract_text(raw: &Value, keys: &[&str]) -> String {
    first_defined(raw, keys).map(normalize_value).unwrap_or_default()
}

fn extract_optional_text(raw: &Value, keys: &[&str]) -> Option<String> {
    first_defined(raw, keys)
        .map(normalize_value)
        .filter(|text| !text.is_empty())
}

/// Provider id, or a synthesized `{source}_{millis}_{base36 x 9}` fallback.
///
/// The fallback is collision-resistant but NOT guaranteed unique; two imports
/// in the same millisecond without provider ids could in principle collide.
fn extract_external_id(raw: &Value, source: &str) -> String {
    let provided = extract_text(raw, ID_KEYS);
    if !provided.is_empty() {
        return provided;
    }
    format!(
        "{}_{}_{}",
        source,
        Utc::now().timestamp_millis(),
        base36_suffix(9)
    )
}

/// Random base36 string drawn from a fresh v4 UUID's bits.
fn base36_suffix(len: usize) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut bits = Uuid::new_v4().as_u128();
    (0..len)
        .map(|_| {
            let ch = ALPHABET[(bits % 36) as usize] as char;
            bits /= 36;
            ch
        })
        .collect()
}

// =============================================================================
// Requirements
// =============================================================================

/// Requirements list: explicit alias fields first, then derived from the
/// description text.
fn extract_requirements(raw: &Value, raw_description: &str) -> Vec<String> {
    if let Some(value) = first_defined(raw, REQUIREMENTS_KEYS) {
        let lines = match value {
            Value::Array(items) => items
                .iter()
                .map(|item| normalize_str(&strip_bullet(&value_to_string(item))))
                .filter(|line| !line.is_empty())
                .collect(),
            _ => split_requirement_lines(&value_to_string(value)),
        };
        if !lines.is_empty() {
            return lines;
        }
    }
    derive_requirements(raw_description)
}

/// Derive requirements from free-text: a "Requirements:"-style section when
/// one exists, otherwise the first bullet-point lines.
pub fn derive_requirements(description: &str) -> Vec<String> {
    if let Some(caps) = REQUIREMENTS_SECTION.captures(description) {
        let lines = split_requirement_lines(caps.get(1).map_or("", |m| m.as_str()));
        if !lines.is_empty() {
            return lines;
        }
    }

    description
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with(['•', '-', '*']))
        .take(MAX_BULLET_REQUIREMENTS)
        .map(strip_bullet)
        .map(|line| normalize_str(&line))
        .filter(|line| !line.is_empty())
        .collect()
}

/// Split a requirements block into non-blank normalized lines.
fn split_requirement_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(strip_bullet)
        .map(|line| normalize_str(&line))
        .filter(|line| !line.is_empty())
        .collect()
}

fn strip_bullet(line: &str) -> String {
    line.trim()
        .trim_start_matches(['•', '-', '*'])
        .trim_start()
        .to_string()
}

// =============================================================================
// Salary
// =============================================================================

fn extract_salary_field(raw: &Value, raw_description: &str) -> Option<String> {
    // Combined salary/compensation text across all aliases
    let combined = SALARY_KEYS
        .iter()
        .filter_map(|key| raw.get(key))
        .filter(|value| !value.is_null())
        .map(value_to_string)
        .filter(|text| !text.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if combined.trim().is_empty() {
        extract_salary(raw_description)
    } else {
        extract_salary(&combined)
    }
}

/// Find a salary expression in free text.
///
/// Currency patterns are tried in priority order; if none matches but the
/// text mentions competitive/negotiable/attractive pay, the literal
/// "Competitive" is returned.
pub fn extract_salary(text: &str) -> Option<String> {
    for pattern in [&*LEONE_PREFIX, &*DOLLAR_PREFIX, &*CODE_SUFFIX] {
        if let Some(found) = pattern.find(text) {
            return Some(found.as_str().trim().to_string());
        }
    }
    if COMPETITIVE.is_match(text) {
        return Some("Competitive".to_string());
    }
    None
}

// =============================================================================
// Deadline
// =============================================================================

fn extract_deadline(raw: &Value) -> Option<NaiveDate> {
    first_defined(raw, DEADLINE_KEYS)
        .map(value_to_string)
        .and_then(|text| parse_deadline(&text))
}

/// Parse a date-like string into a plain date. Returns None on anything
/// unparseable; time and timezone components are dropped.
pub fn parse_deadline(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.date_naive());
    }

    const DATE_FORMATS: &[&str] = &[
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%d/%m/%Y",
        "%d-%m-%Y",
        "%B %d, %Y",
        "%b %d, %Y",
        "%d %B %Y",
        "%d %b %Y",
    ];
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }

    const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed.date());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_alias_order_first_defined_wins() {
        let raw = json!({"position": "Nurse", "job_title": "Ignored"});
        assert_eq!(extract_fields(&raw, "src").title, "Nurse");

        let raw = json!({"title": "Midwife", "position": "Ignored"});
        assert_eq!(extract_fields(&raw, "src").title, "Midwife");
    }

    #[test]
    fn test_null_alias_falls_through() {
        let raw = json!({"title": null, "position": "Clerk"});
        assert_eq!(extract_fields(&raw, "src").title, "Clerk");
    }

    #[test]
    fn test_missing_fields_become_defaults() {
        let fields = extract_fields(&json!({}), "src");
        assert_eq!(fields.title, "");
        assert_eq!(fields.company, "");
        assert_eq!(fields.description, "");
        assert_eq!(fields.location, "");
        assert_eq!(fields.job_type, JobType::FullTime);
        assert!(fields.requirements.is_empty());
        assert_eq!(fields.salary_range, None);
        assert_eq!(fields.deadline, None);
        assert_eq!(fields.source_url, None);
    }

    #[test]
    fn test_external_id_prefers_provider_id() {
        let raw = json!({"id": 12345, "job_id": "other"});
        assert_eq!(extract_fields(&raw, "src").external_id, "12345");

        let raw = json!({"job_id": "abc-9"});
        assert_eq!(extract_fields(&raw, "src").external_id, "abc-9");
    }

    #[test]
    fn test_external_id_fallback_shape() {
        let id = extract_fields(&json!({}), "mysource").external_id;
        let rest = id.strip_prefix("mysource_").expect("source prefix");
        let (millis, suffix) = rest.split_once('_').expect("millis_suffix");
        assert!(millis.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(suffix.len(), 9);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_requirements_explicit_field() {
        let raw = json!({"requirements": "Degree in Nursing\n3 years experience\n"});
        let fields = extract_fields(&raw, "src");
        assert_eq!(fields.requirements, vec!["Degree in Nursing", "3 years experience"]);

        let raw = json!({"qualifications": ["• BSc", "", "Valid license"]});
        let fields = extract_fields(&raw, "src");
        assert_eq!(fields.requirements, vec!["BSc", "Valid license"]);
    }

    #[test]
    fn test_requirements_section_from_description() {
        let description = "Great role.\nRequirements:\nBSc in CS\n2 years experience\nResponsibilities:\nShip code";
        let lines = derive_requirements(description);
        assert_eq!(lines, vec!["BSc in CS", "2 years experience"]);
    }

    #[test]
    fn test_requirements_section_case_insensitive() {
        let description = "QUALIFICATIONS: Diploma required\nDuties: various";
        let lines = derive_requirements(description);
        assert_eq!(lines, vec!["Diploma required"]);
    }

    #[test]
    fn test_requirements_bullet_fallback_caps_at_ten() {
        let bullets: String = (1..=15).map(|i| format!("• Item {}\n", i)).collect();
        let description = format!("No section here.\n{}", bullets);
        let lines = derive_requirements(&description);
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "Item 1");
        assert_eq!(lines[9], "Item 10");
    }

    #[test]
    fn test_requirements_mixed_bullet_markers() {
        let description = "- First\n* Second\n• Third\nplain line";
        assert_eq!(derive_requirements(description), vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_no_requirements_anywhere() {
        assert!(derive_requirements("Just a plain description with no structure.").is_empty());
    }

    #[test]
    fn test_salary_leone_range() {
        assert_eq!(
            extract_salary("SLL 5,000,000 - 8,000,000"),
            Some("SLL 5,000,000 - 8,000,000".to_string())
        );
    }

    #[test]
    fn test_salary_dollar_range_and_suffix() {
        assert_eq!(
            extract_salary("Pay: $500 - $800 monthly"),
            Some("$500 - $800".to_string())
        );
        assert_eq!(
            extract_salary("We offer 2,000,000 SLL per month"),
            Some("2,000,000 SLL".to_string())
        );
    }

    #[test]
    fn test_salary_priority_order() {
        // Leone prefix wins over a dollar figure later in the text
        assert_eq!(
            extract_salary("SLL 900,000 or about $75"),
            Some("SLL 900,000".to_string())
        );
    }

    #[test]
    fn test_salary_competitive_literal() {
        assert_eq!(extract_salary("negotiable"), Some("Competitive".to_string()));
        assert_eq!(extract_salary("ATTRACTIVE package"), Some("Competitive".to_string()));
        assert_eq!(extract_salary(""), None);
        assert_eq!(extract_salary("no pay info here"), None);
    }

    #[test]
    fn test_salary_from_description_when_field_absent() {
        let raw = json!({"description": "Salary of SLL 1,200,000 monthly"});
        let fields = extract_fields(&raw, "src");
        assert_eq!(fields.salary_range.as_deref(), Some("SLL 1,200,000"));
    }

    #[test]
    fn test_deadline_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 9, 30).unwrap();
        assert_eq!(parse_deadline("2025-09-30"), Some(expected));
        assert_eq!(parse_deadline("09/30/2025"), Some(expected));
        assert_eq!(parse_deadline("September 30, 2025"), Some(expected));
        assert_eq!(parse_deadline("30 Sep 2025"), Some(expected));
        assert_eq!(parse_deadline("2025-09-30T12:00:00Z"), Some(expected));
    }

    #[test]
    fn test_deadline_garbage_is_none() {
        assert_eq!(parse_deadline(""), None);
        assert_eq!(parse_deadline("   "), None);
        assert_eq!(parse_deadline("apply soon"), None);
        assert_eq!(parse_deadline("2025-13-45"), None);
    }

    #[test]
    fn test_description_is_normalized_but_requirements_see_raw_text() {
        let raw = json!({
            "description": "<p>Role</p>\nRequirements:\n• One\n• Two\nDuties:\nStuff"
        });
        let fields = extract_fields(&raw, "src");
        // Stored description has tags stripped and whitespace collapsed
        assert!(!fields.description.contains('<'));
        assert!(!fields.description.contains('\n'));
        // Requirements derivation still saw the line structure
        assert_eq!(fields.requirements, vec!["One", "Two"]);
    }
}
