//! Aggregates the dashboard reads from a labeled table.
//!
//! Nothing here renders; every number is computed from `InternshipTable`
//! rows so charts stay a pure function of the pipeline output.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::constants::PREVIEW_ROWS;
use crate::types::{CleanedPosting, InternshipTable};

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z0-9]+").expect("valid word regex"));

/// English filler words left out of the title word counts, in the style of the
/// usual word-cloud stopword set. Contractions are listed by the fragments
/// `WORD_RE` splits them into (`don't` → `don`).
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
        "are", "aren", "as", "at", "be", "because", "been", "before", "being", "below",
        "between", "both", "but", "by", "can", "cannot", "com", "could", "couldn", "did",
        "didn", "do", "does", "doesn", "doing", "don", "down", "during", "each", "else", "ever",
        "few", "for", "from", "further", "get", "had", "hadn", "has", "hasn", "have", "haven",
        "having", "he", "hence", "her", "here", "hers", "herself", "him", "himself", "his",
        "how", "however", "http", "https", "if", "in", "into", "is", "isn", "it", "its",
        "itself", "just", "let", "like", "ll", "me", "more", "most", "mustn", "my", "myself",
        "no", "nor", "not", "of", "off", "on", "once", "only", "or", "other", "otherwise",
        "ought", "our", "ours", "ourselves", "out", "over", "own", "re", "same", "shall",
        "shan", "she", "should", "shouldn", "since", "so", "some", "such", "than", "that",
        "the", "their", "theirs", "them", "themselves", "then", "there", "therefore", "these",
        "they", "this", "those", "through", "to", "too", "under", "until", "up", "ve", "very",
        "was", "wasn", "we", "were", "weren", "what", "when", "where", "which", "while", "who",
        "whom", "why", "with", "won", "would", "wouldn", "www", "you", "your", "yours",
        "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LabelCounts {
    pub fake: usize,
    pub real: usize,
}

impl LabelCounts {
    fn add(&mut self, row: &CleanedPosting) {
        if row.is_likely_fake() {
            self.fake += 1;
        } else {
            self.real += 1;
        }
    }
}

/// Box-plot input: min, quartiles, max.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiveNumber {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl FiveNumber {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalarySpread {
    pub fake: Option<FiveNumber>,
    pub real: Option<FiveNumber>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub labels: LabelCounts,
    pub salary: SalarySpread,
    pub required_experience: BTreeMap<String, LabelCounts>,
    pub employment_type: BTreeMap<String, LabelCounts>,
    pub fake_title_words: Vec<WordCount>,
    pub preview: Vec<CleanedPosting>,
}

impl Summary {
    pub fn build(table: &InternshipTable, top_words: usize) -> Self {
        let mut labels = LabelCounts::default();
        let mut required_experience: BTreeMap<String, LabelCounts> = BTreeMap::new();
        let mut employment_type: BTreeMap<String, LabelCounts> = BTreeMap::new();
        let mut fake_salaries = Vec::new();
        let mut real_salaries = Vec::new();

        for row in table.iter() {
            labels.add(row);
            required_experience
                .entry(row.required_experience.clone())
                .or_default()
                .add(row);
            employment_type
                .entry(row.employment_type.clone())
                .or_default()
                .add(row);
            if row.is_likely_fake() {
                fake_salaries.push(row.avg_salary);
            } else {
                real_salaries.push(row.avg_salary);
            }
        }

        Self {
            generated_at: Utc::now(),
            total: table.len(),
            labels,
            salary: SalarySpread {
                fake: FiveNumber::from_values(&fake_salaries),
                real: FiveNumber::from_values(&real_salaries),
            },
            required_experience,
            employment_type,
            fake_title_words: fake_title_words(table, top_words),
            preview: table.head(PREVIEW_ROWS).to_vec(),
        }
    }
}

/// Most frequent title words among likely-fake rows, ties broken
/// alphabetically.
pub fn fake_title_words(table: &InternshipTable, top: usize) -> Vec<WordCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in table.iter().filter(|r| r.is_likely_fake()) {
        for m in WORD_RE.find_iter(&row.title) {
            let word = m.as_str();
            if word.len() >= 2 && !STOPWORDS.contains(word) {
                *counts.entry(word).or_insert(0) += 1;
            }
        }
    }

    let mut words: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount { word: word.to_string(), count })
        .collect();
    words.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    words.truncate(top);
    words
}

// Linear interpolation between closest ranks; `sorted` must be non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}
