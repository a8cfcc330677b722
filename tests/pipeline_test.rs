use anyhow::Result;
use intern_screen::cache::ResultCache;
use intern_screen::export::{export_to_path, ExportFormat};
use intern_screen::pipeline::processing::Signal;
use intern_screen::report::Summary;
use intern_screen::{Config, DuplicatePolicy, Pipeline, SchemaError, ScreenError};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/resources/postings_sample.csv")
}

fn sample_config() -> Config {
    Config {
        source: sample_path(),
        ..Config::default()
    }
}

#[test]
fn test_sample_dataset_is_filtered_and_labeled() -> Result<()> {
    let config = sample_config();
    let result = Pipeline::new(&config).run(&config.source)?;
    let table = &result.table;

    assert_eq!(result.rows_loaded, 7);
    assert!(result.load_failure.is_none());
    assert_eq!(table.len(), 6);
    assert!(table.get("102").is_none(), "non-internship must be dropped");
    assert!(table.iter().all(|r| r.title.contains("intern")));

    // Parsed salaries 25000, 2500, 15000, 45000 give a median of 20000
    assert_eq!(result.salary_median, Some(20000.0));
    assert_eq!(table.get("101").unwrap().avg_salary, 25000.0);
    assert_eq!(table.get("103").unwrap().avg_salary, 2500.0);
    assert_eq!(table.get("104").unwrap().avg_salary, 20000.0);
    assert_eq!(table.get("105").unwrap().avg_salary, 20000.0);
    assert_eq!(result.parse_warnings, 1);

    let labels: Vec<(&str, u8)> = table
        .iter()
        .map(|r| (r.job_id.as_str(), r.likely_fake))
        .collect();
    assert_eq!(
        labels,
        vec![("101", 1), ("103", 0), ("104", 1), ("105", 1), ("106", 1), ("107", 0)]
    );

    let data = table.get("103").unwrap();
    assert_eq!(data.department, "unknown");
    assert_eq!(data.employment_type, "Short Term");
    assert_eq!(data.required_experience, "no experience");

    assert_eq!(table.get("104").unwrap().employment_type, "Unspecified");
    assert_eq!(table.get("105").unwrap().employment_type, "Unspecified");
    assert_eq!(
        table.get("101").unwrap().description.as_deref(),
        Some("help the team with\ncampaigns")
    );

    assert_eq!(
        result.explain("106").map(|a| a.signals.clone()),
        Some(vec![Signal::MissingCompanyProfile])
    );
    assert_eq!(
        result.explain("105").map(|a| a.signals.clone()),
        Some(vec![Signal::ReportedFraudulent])
    );
    Ok(())
}

#[test]
fn test_label_matches_signal_rule_for_every_row() -> Result<()> {
    let config = sample_config();
    let result = Pipeline::new(&config).run(&config.source)?;

    for row in result.table.iter() {
        let expected = row.company_profile.is_none()
            || row.requirements.is_none()
            || row.required_education.is_none()
            || row.fraudulent == Some(1);
        assert_eq!(row.likely_fake, u8::from(expected), "job_id {}", row.job_id);
    }
    Ok(())
}

#[test]
fn test_missing_value_markers_feed_imputation_and_labels() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("markers.csv");
    fs::write(
        &path,
        "job_id,title,department,required_experience,company_profile,requirements,required_education,employment_type,salary_range,fraudulent\n\
         1,Marketing Intern,NA,NaN,N/A,valid,Bachelor's,None,$100-$200,0\n\
         2,Sales Intern,Sales,Internship,Acme,valid,NA,Full-time,null,0\n",
    )?;

    let result = Pipeline::new(&Config::default()).run(&path)?;

    let first = result.table.get("1").unwrap();
    assert_eq!(first.department, "unknown");
    assert_eq!(first.required_experience, "no experience");
    assert_eq!(first.company_profile, None);
    assert_eq!(first.employment_type, "Unspecified");
    assert_eq!(first.likely_fake, 1);

    let second = result.table.get("2").unwrap();
    assert_eq!(second.required_education, None);
    assert_eq!(second.avg_salary, 150.0);
    assert_eq!(second.likely_fake, 1);
    assert_eq!(result.parse_warnings, 0);
    Ok(())
}

#[test]
fn test_two_runs_produce_identical_tables() -> Result<()> {
    let config = sample_config();
    let pipeline = Pipeline::new(&config);
    let first = pipeline.run(&config.source)?;
    let second = pipeline.run(&config.source)?;

    assert_eq!(first.table, second.table);
    Ok(())
}

#[test]
fn test_missing_source_gives_empty_table_not_error() -> Result<()> {
    let dir = tempdir()?;
    let result = Pipeline::new(&Config::default()).run(&dir.path().join("absent.csv"))?;

    assert!(result.is_load_failure());
    assert!(result.table.is_empty());
    assert_eq!(result.rows_loaded, 0);
    Ok(())
}

#[test]
fn test_header_only_source_is_valid_and_empty() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("empty.csv");
    fs::write(&path, "job_id,title,salary_range\n")?;

    let result = Pipeline::new(&Config::default()).run(&path)?;
    assert!(!result.is_load_failure());
    assert!(result.table.is_empty());
    Ok(())
}

#[test]
fn test_duplicate_ids_follow_configured_policy() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("dupes.csv");
    fs::write(
        &path,
        "job_id,title,salary_range\n1,Intern A,$100-$200\n1,Intern B,$300-$400\n",
    )?;

    let err = Pipeline::new(&Config::default()).run(&path).unwrap_err();
    assert!(matches!(
        err,
        ScreenError::Schema(SchemaError::DuplicateJobId(_))
    ));

    let keep_first = Config {
        duplicate_policy: DuplicatePolicy::KeepFirst,
        ..Config::default()
    };
    let result = Pipeline::new(&keep_first).run(&path)?;
    assert_eq!(result.table.len(), 1);
    assert_eq!(result.table.get("1").unwrap().avg_salary, 150.0);
    Ok(())
}

#[test]
fn test_summary_and_export_from_sample() -> Result<()> {
    let config = sample_config();
    let result = Pipeline::new(&config).run(&config.source)?;

    let summary = Summary::build(&result.table, 5);
    assert_eq!(summary.labels.fake, 4);
    assert_eq!(summary.labels.real, 2);
    assert_eq!(summary.fake_title_words[0].word, "intern");
    assert_eq!(summary.fake_title_words[0].count, 4);

    let dir = tempdir()?;
    let out = dir.path().join("nested/labeled.csv");
    export_to_path(&result.table, ExportFormat::Csv, &out)?;
    let written = fs::read_to_string(&out)?;
    assert!(written.starts_with("job_id,title,"));
    assert!(!written.contains("salary_range"));
    assert!(!written.contains("telecommuting"));
    Ok(())
}

#[test]
fn test_cache_reuses_result_for_same_source() -> Result<()> {
    let config = sample_config();
    let mut cache = ResultCache::new();

    let first = cache.get_or_run(&config)?;
    let second = cache.get_or_run(&config)?;
    assert_eq!(first, second);
    assert_eq!(cache.len(), 1);
    Ok(())
}
