use std::path::PathBuf;
use thiserror::Error;

/// Why a source table could not be read.
///
/// The loader never lets this escape as a hard failure; it is reported next
/// to an empty table so later stages still run.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("source file not found: {0}")]
    NotFound(PathBuf),

    #[error("I/O error reading source: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed table: {0}")]
    Malformed(#[from] csv::Error),
}

/// Structural problems with the posting table. Always fatal to a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("required column missing: {0}")]
    MissingColumn(String),

    #[error("row {row} has no job_id")]
    MissingJobId { row: usize },

    #[error("duplicate job_id after filtering: {0}")]
    DuplicateJobId(String),
}

#[derive(Error, Debug)]
pub enum ScreenError {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScreenError>;
