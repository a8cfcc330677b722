use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::DEFAULT_TITLE_KEYWORD;
use crate::error::{Result, ScreenError};

pub const DEFAULT_CONFIG_PATH: &str = "intern_screen.toml";

/// What to do when two filtered postings share a `job_id`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail the run with a schema error.
    #[default]
    Reject,
    /// Keep the first occurrence in source order, drop the rest.
    KeepFirst,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub log_dir: PathBuf,
    pub title_keyword: String,
    pub duplicate_policy: DuplicatePolicy,
    /// Used for every row when no salary in the table parses.
    pub fallback_salary: f64,
    pub top_words: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::from("data/fake_job_postings.csv"),
            output_dir: PathBuf::from("output"),
            log_dir: PathBuf::from("logs"),
            title_keyword: DEFAULT_TITLE_KEYWORD.to_string(),
            duplicate_policy: DuplicatePolicy::Reject,
            fallback_salary: 0.0,
            top_words: 25,
        }
    }
}

impl Config {
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            ScreenError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `config_path` if it exists, otherwise returns defaults.
    pub fn load_or_default(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            Self::load(config_path)
        } else {
            debug!("No config at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.title_keyword.trim().is_empty() {
            return Err(ScreenError::Config("title_keyword must not be empty".to_string()));
        }
        if !self.fallback_salary.is_finite() {
            return Err(ScreenError::Config("fallback_salary must be finite".to_string()));
        }
        Ok(())
    }
}
