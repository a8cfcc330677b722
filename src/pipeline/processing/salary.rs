use metrics::counter;
use tracing::{debug, info, warn};

use crate::types::InternPosting;

/// A salary string that could not be read. Recovered by imputation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseWarning {
    pub job_id: String,
    pub raw: String,
}

/// Per-row salary estimates for one table, in row order, with no gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryImputation {
    pub values: Vec<f64>,
    /// Median of the successfully parsed values, if any parsed.
    pub median: Option<f64>,
    pub imputed: usize,
    pub warnings: Vec<ParseWarning>,
}

/// Turn a raw `salary_range` cell into one number.
///
/// `"$X-$Y"` gives the mean of the two integers, a bare number is read as a
/// float, anything else is `None`.
pub fn parse_salary(raw: Option<&str>) -> Option<f64> {
    let cleaned = raw?.replace('$', "");

    if let Some((low, high)) = cleaned.split_once('-') {
        let low = parse_integer(low)?;
        let high = parse_integer(high)?;
        return Some((low + high) / 2.0);
    }

    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// An optionally signed run of digits of any length, read as a float.
fn parse_integer(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let digits = raw.strip_prefix(|c| c == '+' || c == '-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Middle value of `values`; the mean of the two middle values for an even
/// count.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Parse every posting's salary, then fill the gaps with the median of the
/// parsed values. `fallback` fills them when nothing parsed at all.
pub fn impute_salaries(postings: &[InternPosting], fallback: f64) -> SalaryImputation {
    let mut warnings = Vec::new();
    let parsed: Vec<Option<f64>> = postings
        .iter()
        .map(|p| {
            let value = parse_salary(p.salary_range.as_deref());
            if value.is_none() {
                if let Some(raw) = &p.salary_range {
                    debug!(job_id = %p.job_id, raw = %raw, "Unparseable salary_range");
                    warnings.push(ParseWarning {
                        job_id: p.job_id.clone(),
                        raw: raw.clone(),
                    });
                }
            }
            value
        })
        .collect();

    let known: Vec<f64> = parsed.iter().flatten().copied().collect();
    let median = median(&known);
    let fill = match median {
        Some(m) => m,
        None => {
            if !postings.is_empty() {
                warn!(fallback, "No salary parsed, using fallback for every row");
            }
            fallback
        }
    };

    let imputed = parsed.iter().filter(|v| v.is_none()).count();
    let values = parsed.into_iter().map(|v| v.unwrap_or(fill)).collect();

    info!(
        parsed = known.len(),
        imputed,
        warnings = warnings.len(),
        "Salary estimates derived"
    );
    counter!("intern_salary_parse_warnings_total").increment(warnings.len() as u64);

    SalaryImputation {
        values,
        median,
        imputed,
        warnings,
    }
}
