use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use tracing::debug;

use crate::config::{Config, DuplicatePolicy};
use crate::error::Result;
use crate::pipeline::{Pipeline, PipelineResult};

/// Key for a pipeline result: the source bytes plus every setting that
/// changes the output.
pub fn compute_cache_key(source: &[u8], config: &Config) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source);
    hasher.update(b"|");
    hasher.update(config.title_keyword.to_lowercase().as_bytes());
    hasher.update(b"|");
    hasher.update(match config.duplicate_policy {
        DuplicatePolicy::Reject => b"reject".as_slice(),
        DuplicatePolicy::KeepFirst => b"keep_first".as_slice(),
    });
    hasher.update(b"|");
    hasher.update(config.fallback_salary.to_bits().to_le_bytes());
    hex::encode(hasher.finalize())
}

/// Pipeline results kept across repeated renders. Owned by the caller.
///
/// Only successful runs over a readable source are stored; load failures and
/// schema errors are recomputed every time.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: HashMap<String, PipelineResult>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&PipelineResult> {
        self.entries.get(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Return the cached result for `config.source`, running the pipeline on
    /// a miss.
    pub fn get_or_run(&mut self, config: &Config) -> Result<PipelineResult> {
        let pipeline = Pipeline::new(config);
        let bytes = match fs::read(&config.source) {
            Ok(bytes) => bytes,
            Err(_) => return pipeline.run(&config.source),
        };

        let key = compute_cache_key(&bytes, config);
        if let Some(hit) = self.entries.get(&key) {
            debug!(%key, "Result cache hit");
            return Ok(hit.clone());
        }

        let result = pipeline.run_reader(bytes.as_slice())?;
        debug!(%key, "Result cache miss, stored");
        self.entries.insert(key, result.clone());
        Ok(result)
    }
}
