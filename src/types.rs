use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One raw row of the source table, resolved against the known column names.
///
/// Every field is optional: the loader does no validation and missing-value
/// markers are null. `fraudulent` is kept as text until the normalizer reads it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostingRecord {
    pub job_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub department: Option<String>,
    pub salary_range: Option<String>,
    pub telecommuting: Option<String>,
    pub company_profile: Option<String>,
    pub requirements: Option<String>,
    pub required_education: Option<String>,
    pub employment_type: Option<String>,
    pub required_experience: Option<String>,
    pub fraudulent: Option<String>,
}

/// A posting that passed the internship filter and carries a unique key.
#[derive(Debug, Clone, PartialEq)]
pub struct InternPosting {
    pub job_id: String,
    /// Lowercased, always contains the title keyword.
    pub title: String,
    /// Lowercased.
    pub description: Option<String>,
    pub department: Option<String>,
    pub salary_range: Option<String>,
    pub company_profile: Option<String>,
    pub requirements: Option<String>,
    pub required_education: Option<String>,
    pub employment_type: Option<String>,
    pub required_experience: Option<String>,
    pub fraudulent: Option<u8>,
}

/// Output row of the pipeline. Field order is the output column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedPosting {
    pub job_id: String,
    pub title: String,
    pub description: Option<String>,
    pub department: String,
    pub company_profile: Option<String>,
    pub requirements: Option<String>,
    pub required_education: Option<String>,
    pub employment_type: String,
    pub required_experience: String,
    pub fraudulent: Option<u8>,
    pub avg_salary: f64,
    pub likely_fake: u8,
}

impl CleanedPosting {
    pub fn is_likely_fake(&self) -> bool {
        self.likely_fake == 1
    }
}

/// Cleaned, labeled internships keyed by `job_id`, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InternshipTable {
    rows: Vec<CleanedPosting>,
    index: HashMap<String, usize>,
}

impl InternshipTable {
    /// Builds the table. Callers guarantee `job_id` uniqueness; on a repeat
    /// the index keeps the first row.
    pub fn from_rows(rows: Vec<CleanedPosting>) -> Self {
        let mut index = HashMap::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            index.entry(row.job_id.clone()).or_insert(i);
        }
        Self { rows, index }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, job_id: &str) -> Option<&CleanedPosting> {
        self.position(job_id).map(|i| &self.rows[i])
    }

    /// Row number of `job_id` in source order.
    pub fn position(&self, job_id: &str) -> Option<usize> {
        self.index.get(job_id).copied()
    }

    pub fn rows(&self) -> &[CleanedPosting] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &CleanedPosting> {
        self.rows.iter()
    }

    pub fn likely_fake_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_likely_fake()).count()
    }

    pub fn head(&self, n: usize) -> &[CleanedPosting] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn into_rows(self) -> Vec<CleanedPosting> {
        self.rows
    }
}
