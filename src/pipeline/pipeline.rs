use std::io::Read;
use std::path::Path;
use tracing::{info, instrument};

use crate::config::Config;
use crate::error::Result;
use crate::pipeline::ingestion::{LoadReport, Loader, RawTable};
use crate::pipeline::processing::engine::FeatureEngine;
use crate::pipeline::processing::label::LabelAssessment;
use crate::pipeline::processing::normalize::FilterNormalizer;
use crate::types::InternshipTable;

/// Result of a complete pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResult {
    pub table: InternshipTable,
    /// Parallel to `table.rows()`.
    pub assessments: Vec<LabelAssessment>,
    pub rows_loaded: usize,
    /// Cause of a load failure; the table is then empty.
    pub load_failure: Option<String>,
    pub salary_median: Option<f64>,
    pub salaries_imputed: usize,
    pub parse_warnings: usize,
}

impl PipelineResult {
    pub fn is_load_failure(&self) -> bool {
        self.load_failure.is_some()
    }

    /// Signals that fired for `job_id`, if it is in the table.
    pub fn explain(&self, job_id: &str) -> Option<&LabelAssessment> {
        let idx = self.table.position(job_id)?;
        self.assessments.get(idx)
    }
}

/// Loader, then filter & normalizer, then feature/label engine.
pub struct Pipeline {
    normalizer: FilterNormalizer,
    engine: FeatureEngine,
}

impl Pipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            normalizer: FilterNormalizer::new(&config.title_keyword, config.duplicate_policy),
            engine: FeatureEngine::new(config.fallback_salary),
        }
    }

    /// Run against a file. A load failure yields an empty result carrying the
    /// cause; schema violations are returned as errors.
    #[instrument(skip(self))]
    pub fn run(&self, source: &Path) -> Result<PipelineResult> {
        info!("🚀 Starting pipeline");
        let report = Loader::load(source);
        self.process(report)
    }

    /// Run against any readable source handle.
    pub fn run_reader<R: Read>(&self, reader: R) -> Result<PipelineResult> {
        self.process(Loader::load_from(reader))
    }

    /// Run the filter and engine stages on an already-loaded table.
    pub fn run_table(&self, table: &RawTable) -> Result<PipelineResult> {
        self.transform(table, table.len(), None)
    }

    fn process(&self, report: LoadReport) -> Result<PipelineResult> {
        let failure = report.failure.as_ref().map(|e| e.to_string());
        self.transform(&report.table, report.rows, failure)
    }

    fn transform(
        &self,
        table: &RawTable,
        rows_loaded: usize,
        load_failure: Option<String>,
    ) -> Result<PipelineResult> {
        let postings = self.normalizer.run(table)?;
        let output = self.engine.run(postings);

        info!("✅ Pipeline finished with {} internships", output.rows.len());
        Ok(PipelineResult {
            table: InternshipTable::from_rows(output.rows),
            assessments: output.assessments,
            rows_loaded,
            load_failure,
            salary_median: output.salary_median,
            salaries_imputed: output.salaries_imputed,
            parse_warnings: output.parse_warnings.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SchemaError, ScreenError};

    const SAMPLE: &str = "\
job_id,title,description,department,salary_range,telecommuting,company_profile,requirements,required_education,employment_type,required_experience,fraudulent
1,Marketing Intern,Help With Campaigns,,$20000-$30000,0,,valid,Bachelor's Degree,Other,,0
2,Software Engineer,Build,Eng,$90000-$100000,0,Acme,lots,Master's Degree,Full-time,Mid-Senior level,0
3,Data INTERN,Crunch numbers,Data,,1,Acme,sql,High School or equivalent,Temporary,Internship,0
4,Design Internship,Draw,Design,1500,0,Acme,figma,Unspecified,Part-time,Entry level,1
";

    #[test]
    fn test_sample_end_to_end() {
        let result = Pipeline::new(&Config::default()).run_reader(SAMPLE.as_bytes()).unwrap();
        let table = &result.table;

        assert_eq!(result.rows_loaded, 4);
        assert_eq!(table.len(), 3);
        assert!(table.get("2").is_none());

        let first = table.get("1").unwrap();
        assert_eq!(first.avg_salary, 25000.0);
        assert_eq!(first.likely_fake, 1);
        assert_eq!(first.department, "unknown");
        assert_eq!(first.employment_type, "Unspecified");

        // Median of 25000 and 1500
        let third = table.get("3").unwrap();
        assert_eq!(third.avg_salary, 13250.0);
        assert_eq!(third.likely_fake, 0);
        assert_eq!(third.employment_type, "Short Term");
        assert_eq!(third.title, "data intern");

        let fourth = table.get("4").unwrap();
        assert_eq!(fourth.avg_salary, 1500.0);
        assert_eq!(fourth.likely_fake, 1);
        assert_eq!(result.salaries_imputed, 1);
    }

    #[test]
    fn test_every_row_contains_keyword() {
        let result = Pipeline::new(&Config::default()).run_reader(SAMPLE.as_bytes()).unwrap();
        assert!(result.table.iter().all(|r| r.title.contains("intern")));
    }

    #[test]
    fn test_rerun_is_identical() {
        let pipeline = Pipeline::new(&Config::default());
        let a = pipeline.run_reader(SAMPLE.as_bytes()).unwrap();
        let b = pipeline.run_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_source_yields_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        let result = Pipeline::new(&Config::default())
            .run(&dir.path().join("missing.csv"))
            .unwrap();

        assert!(result.is_load_failure());
        assert!(result.table.is_empty());
    }

    #[test]
    fn test_duplicate_key_surfaces_as_error() {
        let data = "job_id,title\n1,Intern\n1,Intern Two\n";
        let err = Pipeline::new(&Config::default())
            .run_reader(data.as_bytes())
            .unwrap_err();
        assert!(matches!(
            err,
            ScreenError::Schema(SchemaError::DuplicateJobId(ref id)) if id == "1"
        ));
    }

    #[test]
    fn test_explain_lists_fired_signals() {
        let result = Pipeline::new(&Config::default()).run_reader(SAMPLE.as_bytes()).unwrap();
        let why = result.explain("4").unwrap();
        assert_eq!(why.signals.len(), 1);
        assert_eq!(result.explain("1").map(|a| a.signals.len()), Some(1));
        assert_eq!(result.explain("3").map(|a| a.likely_fake), Some(0));
        assert!(result.explain("2").is_none());
    }
}
