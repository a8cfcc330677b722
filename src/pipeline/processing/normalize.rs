use metrics::counter;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

use crate::config::DuplicatePolicy;
use crate::constants::*;
use crate::error::SchemaError;
use crate::pipeline::ingestion::RawTable;
use crate::types::{InternPosting, PostingRecord};

/// Selects internship postings and re-keys them by `job_id`.
#[derive(Debug, Clone)]
pub struct FilterNormalizer {
    keyword: String,
    duplicate_policy: DuplicatePolicy,
}

impl FilterNormalizer {
    pub fn new(keyword: &str, duplicate_policy: DuplicatePolicy) -> Self {
        Self {
            keyword: keyword.to_lowercase(),
            duplicate_policy,
        }
    }

    /// Resolve columns, lowercase every record, keep internship titles, and
    /// key the survivors by `job_id`.
    #[instrument(skip_all, fields(keyword = %self.keyword))]
    pub fn run(&self, table: &RawTable) -> Result<Vec<InternPosting>, SchemaError> {
        let records = resolve_records(table)?;
        let total = records.len();
        let lowered = lowercase_text(records);

        let matched: Vec<(usize, PostingRecord)> = lowered
            .into_iter()
            .enumerate()
            .filter(|(_, r)| self.is_internship(r))
            .collect();

        let postings = self.key_by_job_id(matched)?;
        info!("Kept {} internship postings out of {}", postings.len(), total);
        counter!("intern_rows_filtered_total").increment(postings.len() as u64);
        Ok(postings)
    }

    fn is_internship(&self, record: &PostingRecord) -> bool {
        record
            .title
            .as_deref()
            .is_some_and(|t| t.contains(&self.keyword))
    }

    fn key_by_job_id(
        &self,
        matched: Vec<(usize, PostingRecord)>,
    ) -> Result<Vec<InternPosting>, SchemaError> {
        let mut seen = HashSet::with_capacity(matched.len());
        let mut postings = Vec::with_capacity(matched.len());

        for (i, record) in matched {
            let job_id = record
                .job_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .ok_or(SchemaError::MissingJobId { row: i + 1 })?
                .to_string();

            if !seen.insert(job_id.clone()) {
                match self.duplicate_policy {
                    DuplicatePolicy::Reject => return Err(SchemaError::DuplicateJobId(job_id)),
                    DuplicatePolicy::KeepFirst => {
                        warn!(%job_id, "Dropping repeated job_id, first occurrence kept");
                        continue;
                    }
                }
            }

            postings.push(into_intern_posting(job_id, record));
        }

        Ok(postings)
    }
}

/// Map raw rows onto named fields. `job_id` and `title` must exist as
/// columns; the rest read as null when absent. A table without rows
/// resolves to nothing, whatever its headers.
pub fn resolve_records(table: &RawTable) -> Result<Vec<PostingRecord>, SchemaError> {
    if table.is_empty() {
        return Ok(Vec::new());
    }

    let required = |name: &str| {
        table
            .column_index(name)
            .ok_or_else(|| SchemaError::MissingColumn(name.to_string()))
    };
    let job_id = required(COL_JOB_ID)?;
    let title = required(COL_TITLE)?;

    let optional = |name: &str| {
        let idx = table.column_index(name);
        if idx.is_none() {
            debug!(column = name, "Column absent, reading as null");
        }
        idx
    };
    let description = optional(COL_DESCRIPTION);
    let department = optional(COL_DEPARTMENT);
    let salary_range = optional(COL_SALARY_RANGE);
    let telecommuting = optional(COL_TELECOMMUTING);
    let company_profile = optional(COL_COMPANY_PROFILE);
    let requirements = optional(COL_REQUIREMENTS);
    let required_education = optional(COL_REQUIRED_EDUCATION);
    let employment_type = optional(COL_EMPLOYMENT_TYPE);
    let required_experience = optional(COL_REQUIRED_EXPERIENCE);
    let fraudulent = optional(COL_FRAUDULENT);

    let records = table
        .rows
        .iter()
        .map(|row| {
            let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i).cloned().flatten());
            PostingRecord {
                job_id: cell(Some(job_id)),
                title: cell(Some(title)),
                description: cell(description),
                department: cell(department),
                salary_range: cell(salary_range),
                telecommuting: cell(telecommuting),
                company_profile: cell(company_profile),
                requirements: cell(requirements),
                required_education: cell(required_education),
                employment_type: cell(employment_type),
                required_experience: cell(required_experience),
                fraudulent: cell(fraudulent),
            }
        })
        .collect();

    Ok(records)
}

/// Lowercase `title` and `description` on every record.
pub fn lowercase_text(records: Vec<PostingRecord>) -> Vec<PostingRecord> {
    records
        .into_iter()
        .map(|r| PostingRecord {
            title: r.title.map(|t| t.to_lowercase()),
            description: r.description.map(|d| d.to_lowercase()),
            ..r
        })
        .collect()
}

/// Read the 0/1 ground-truth flag; anything else is unknown.
pub fn parse_flag(raw: Option<&str>) -> Option<u8> {
    let raw = raw?.trim();
    match raw {
        "1" => Some(1),
        "0" => Some(0),
        other => match other.parse::<f64>() {
            Ok(v) if v == 1.0 => Some(1),
            Ok(v) if v == 0.0 => Some(0),
            _ => None,
        },
    }
}

fn into_intern_posting(job_id: String, record: PostingRecord) -> InternPosting {
    let fraudulent = parse_flag(record.fraudulent.as_deref());
    InternPosting {
        job_id,
        title: record.title.unwrap_or_default(),
        description: record.description,
        department: record.department,
        salary_range: record.salary_range,
        company_profile: record.company_profile,
        requirements: record.requirements,
        required_education: record.required_education,
        employment_type: record.employment_type,
        required_experience: record.required_experience,
        fraudulent,
    }
}
