/// Source column names. These are part of the input contract.
pub const COL_JOB_ID: &str = "job_id";
pub const COL_TITLE: &str = "title";
pub const COL_DESCRIPTION: &str = "description";
pub const COL_DEPARTMENT: &str = "department";
pub const COL_SALARY_RANGE: &str = "salary_range";
pub const COL_TELECOMMUTING: &str = "telecommuting";
pub const COL_COMPANY_PROFILE: &str = "company_profile";
pub const COL_REQUIREMENTS: &str = "requirements";
pub const COL_REQUIRED_EDUCATION: &str = "required_education";
pub const COL_EMPLOYMENT_TYPE: &str = "employment_type";
pub const COL_REQUIRED_EXPERIENCE: &str = "required_experience";
pub const COL_FRAUDULENT: &str = "fraudulent";

// Derived columns
pub const COL_AVG_SALARY: &str = "avg_salary";
pub const COL_LIKELY_FAKE: &str = "likely_fake";

/// Cell texts read as null, matching the default missing-value markers of
/// common tabular readers. Matched exactly, without trimming.
pub const NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_null_token(cell: &str) -> bool {
    NULL_TOKENS.contains(&cell)
}

/// Default substring that marks a posting as an internship.
pub const DEFAULT_TITLE_KEYWORD: &str = "intern";

// Imputation defaults
pub const UNKNOWN_DEPARTMENT: &str = "unknown";
pub const UNSPECIFIED_EMPLOYMENT: &str = "Unspecified";
pub const NO_EXPERIENCE: &str = "no experience";

/// Placeholder company profile text treated as absent.
pub const NO_PROFILE_PLACEHOLDER: &str = "no profile";

/// Employment type remaps, applied in order after null-fill.
pub const EMPLOYMENT_TYPE_REMAPS: &[(&str, &str)] = &[
    ("Other", UNSPECIFIED_EMPLOYMENT),
    ("Temporary", "Short Term"),
];

/// Rows shown in a table preview.
pub const PREVIEW_ROWS: usize = 20;

/// Output column order after `job_id`.
pub fn output_columns() -> Vec<&'static str> {
    vec![
        COL_TITLE,
        COL_DESCRIPTION,
        COL_DEPARTMENT,
        COL_COMPANY_PROFILE,
        COL_REQUIREMENTS,
        COL_REQUIRED_EDUCATION,
        COL_EMPLOYMENT_TYPE,
        COL_REQUIRED_EXPERIENCE,
        COL_FRAUDULENT,
        COL_AVG_SALARY,
        COL_LIKELY_FAKE,
    ]
}
