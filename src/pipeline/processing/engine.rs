use metrics::counter;
use tracing::{info, instrument};

use crate::pipeline::processing::impute::impute_fields;
use crate::pipeline::processing::label::{assess, LabelAssessment};
use crate::pipeline::processing::salary::{impute_salaries, ParseWarning};
use crate::types::{CleanedPosting, InternPosting};

/// Output of the feature/label stage.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureOutput {
    pub rows: Vec<CleanedPosting>,
    /// Parallel to `rows`: which signals fired for each.
    pub assessments: Vec<LabelAssessment>,
    pub salary_median: Option<f64>,
    pub salaries_imputed: usize,
    pub parse_warnings: Vec<ParseWarning>,
}

/// Derives `avg_salary` and `likely_fake` for filtered postings.
#[derive(Debug, Clone)]
pub struct FeatureEngine {
    fallback_salary: f64,
}

impl FeatureEngine {
    pub fn new(fallback_salary: f64) -> Self {
        Self { fallback_salary }
    }

    #[instrument(skip_all, fields(postings = postings.len()))]
    pub fn run(&self, postings: Vec<InternPosting>) -> FeatureOutput {
        // Salary median comes from this exact row set before any row is built
        let salaries = impute_salaries(&postings, self.fallback_salary);

        let mut rows = Vec::with_capacity(postings.len());
        let mut assessments = Vec::with_capacity(postings.len());

        for (posting, avg_salary) in postings.into_iter().zip(salaries.values.iter().copied()) {
            let fields = impute_fields(&posting);
            let assessment = assess(&fields, posting.fraudulent);

            rows.push(CleanedPosting {
                job_id: posting.job_id,
                title: posting.title,
                description: posting.description,
                department: fields.department,
                company_profile: fields.company_profile,
                requirements: fields.requirements,
                required_education: fields.required_education,
                employment_type: fields.employment_type,
                required_experience: fields.required_experience,
                fraudulent: posting.fraudulent,
                avg_salary,
                likely_fake: assessment.likely_fake,
            });
            assessments.push(assessment);
        }

        let fake = rows.iter().filter(|r| r.is_likely_fake()).count();
        info!("Labeled {} of {} postings as likely fake", fake, rows.len());
        counter!("intern_likely_fake_total").increment(fake as u64);

        FeatureOutput {
            rows,
            assessments,
            salary_median: salaries.median,
            salaries_imputed: salaries.imputed,
            parse_warnings: salaries.warnings,
        }
    }
}
